//! Two-source description reconciliation.
//!
//! The base rendition has trustworthy line breaks and spacing but mangled
//! punctuation; the alt rendition has the punctuation right but arrives as a
//! single collapsed block. Merging them is a positional word walk:
//!
//! 1. [`tokenize`]: protect double spaces, split on whitespace
//! 2. [`align`]: pair tokens by index, collect mismatches
//! 3. [`resolve`]: repair, graft, restore, or redact each mismatch
//! 4. [`finalize`]: strip leaked tags, straighten quotes

pub mod align;
pub mod finalize;
pub mod resolve;
pub mod tokenize;

use tracing::debug;

pub use align::{Alignment, Mismatch};
pub use finalize::{finalize, fix_single_quotes, strip_html_tags};
pub use resolve::{Outcome, REDACTION, Resolved, Rule, repair_punctuation};
pub use tokenize::{DOUBLE_SPACE_MARKER, normalize_and_tokenize};

/// Canonical text plus what it took to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Merged, finalized text.
    pub text: String,
    /// Number of index positions where the renditions disagreed.
    pub mismatches: usize,
    /// How many of those ended in [`REDACTION`].
    pub redactions: usize,
    /// Base token index where the alt rendition ran out, if it did.
    pub exhausted_at: Option<usize>,
}

/// Merge `base` and `alt` into one canonical text.
pub fn reconcile(base: &str, alt: &str) -> Reconciliation {
    let protected_base = tokenize::protect_double_spaces(base);
    let protected_alt = tokenize::protect_double_spaces(alt);
    let base_tokens = tokenize::tokenize(&protected_base);
    let alt_tokens = tokenize::tokenize(&protected_alt);

    let alignment = align::align(&base_tokens, &alt_tokens);
    if let Some(index) = alignment.exhausted_at {
        debug!(
            index,
            base_tokens = base_tokens.len(),
            alt_tokens = alt_tokens.len(),
            "alt rendition exhausted, leaving remaining base words as-is"
        );
    }

    let resolved = resolve::resolve(&protected_base, &alignment.mismatches);

    debug!(
        mismatches = alignment.mismatches.len(),
        redactions = resolved.redactions(),
        "renditions reconciled"
    );

    Reconciliation {
        text: finalize(&resolved.text),
        mismatches: alignment.mismatches.len(),
        redactions: resolved.redactions(),
        exhausted_at: alignment.exhausted_at,
    }
}

/// Finalize the base rendition alone, for when no alt rendition exists.
pub fn degrade(base: &str) -> String {
    finalize(base)
}
