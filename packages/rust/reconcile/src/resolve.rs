//! Mismatch resolution against the running base text.
//!
//! Each mismatch is settled by whole-word substitutions on a working copy of
//! the (double-space protected) base text. A substitution hits every
//! occurrence of the word, not just the one at the mismatch index.
//!
//! The four rules are evaluated as independent guarded checks:
//!
//! 1. punctuation repair (base word contains a period)
//! 2. grafting (first and last characters agree)
//! 3. double-space preservation (base word is the marker)
//! 4. redaction (nothing above changed the text)

use tracing::trace;

use crate::align::Mismatch;
use crate::tokenize::{DOUBLE_SPACE_MARKER, restore_double_spaces};

/// Placeholder written over a word that cannot be reconciled.
pub const REDACTION: &str = "[CENSORED]";

/// Words shorter than this never graft and are never redacted.
const MIN_WORD_CHARS: usize = 2;

/// A rule that changed the running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    PunctuationRepair,
    Graft,
    DoubleSpace,
    Redaction,
}

/// What happened to one mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub index: usize,
    /// Rules that changed the text, in evaluation order. Empty when the
    /// mismatch was left alone.
    pub rules: Vec<Rule>,
}

/// Repaired text plus the per-mismatch outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub outcomes: Vec<Outcome>,
}

impl Resolved {
    /// Number of mismatches that ended in a redaction.
    pub fn redactions(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.rules.contains(&Rule::Redaction))
            .count()
    }
}

/// Apply every mismatch to `base_text` in order, then restore leftover
/// double-space markers.
///
/// `base_text` must be the protected text the base tokens were split from.
pub fn resolve(base_text: &str, mismatches: &[Mismatch<'_>]) -> Resolved {
    let mut text = base_text.to_string();
    let mut outcomes = Vec::with_capacity(mismatches.len());

    for mismatch in mismatches {
        let rules = resolve_one(&mut text, mismatch);
        trace!(
            index = mismatch.index,
            base = mismatch.base,
            alt = mismatch.alt,
            ?rules,
            "mismatch resolved"
        );
        outcomes.push(Outcome {
            index: mismatch.index,
            rules,
        });
    }

    Resolved {
        text: restore_double_spaces(&text),
        outcomes,
    }
}

fn resolve_one(text: &mut String, mismatch: &Mismatch<'_>) -> Vec<Rule> {
    let (base, alt) = (mismatch.base, mismatch.alt);
    let mut rules = Vec::new();

    if let Some(repaired) = repair_punctuation(base) {
        if substitute(text, base, &repaired) {
            rules.push(Rule::PunctuationRepair);
        }
    }

    let long_enough =
        base.chars().count() >= MIN_WORD_CHARS && alt.chars().count() >= MIN_WORD_CHARS;

    if long_enough && same_ends(base, alt) && substitute(text, base, alt) {
        rules.push(Rule::Graft);
    }

    if base == DOUBLE_SPACE_MARKER && alt != DOUBLE_SPACE_MARKER && substitute(text, base, alt) {
        rules.push(Rule::DoubleSpace);
    }

    if rules.is_empty() && long_enough && substitute(text, base, REDACTION) {
        rules.push(Rule::Redaction);
    }

    rules
}

/// Space out periods inside `word`, folding a spaced-out ellipsis back into
/// `...`. Returns `None` when the word has no period or nothing changes.
pub fn repair_punctuation(word: &str) -> Option<String> {
    if !word.contains('.') {
        return None;
    }

    let mut fixed = word.replace('.', ". ");
    if fixed.contains(". . . ") {
        fixed = fixed.replace(". . . ", "...");
    }
    let fixed = fixed.trim_end();

    (fixed != word).then(|| fixed.to_string())
}

/// First and last characters agree.
fn same_ends(a: &str, b: &str) -> bool {
    a.chars().next() == b.chars().next() && a.chars().next_back() == b.chars().next_back()
}

/// Replace every whitespace-delimited occurrence of `word` in `text`.
/// Returns whether anything was replaced.
fn substitute(text: &mut String, word: &str, replacement: &str) -> bool {
    let (replaced, count) = replace_word(text, word, replacement);
    if count > 0 {
        *text = replaced;
    }
    count > 0
}

/// Whole-word replace: a match must sit between whitespace or text edges.
fn replace_word(text: &str, word: &str, replacement: &str) -> (String, usize) {
    if word.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut last = 0;

    for (start, _) in text.match_indices(word) {
        let end = start + word.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let after_ok = text[end..].chars().next().is_none_or(char::is_whitespace);

        if before_ok && after_ok {
            out.push_str(&text[last..start]);
            out.push_str(replacement);
            last = end;
            count += 1;
        }
    }

    out.push_str(&text[last..]);
    (out, count)
}
