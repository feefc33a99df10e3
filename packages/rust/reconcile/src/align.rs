//! Positional word alignment.
//!
//! Tokens are compared strictly by index. An inserted or dropped word shifts
//! every later comparison; that desync is kept as-is rather than papered over
//! with a sequence diff.

/// A base/alt token pair that differs at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch<'a> {
    pub index: usize,
    pub base: &'a str,
    pub alt: &'a str,
}

/// Result of walking two token sequences side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment<'a> {
    /// Differing pairs in index order.
    pub mismatches: Vec<Mismatch<'a>>,
    /// Base index at which the alt sequence ran out, if it did.
    pub exhausted_at: Option<usize>,
}

impl Alignment<'_> {
    /// `true` when the alt sequence was shorter than the base.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted_at.is_some()
    }
}

/// Compare `base` and `alt` index by index.
///
/// Walking stops as soon as `alt` has no token at the current base index;
/// the remaining base tokens are left out of the result entirely.
pub fn align<'a, S: AsRef<str>>(base: &'a [S], alt: &'a [S]) -> Alignment<'a> {
    let mut alignment = Alignment::default();

    for (index, base_token) in base.iter().enumerate() {
        let Some(alt_token) = alt.get(index) else {
            alignment.exhausted_at = Some(index);
            break;
        };

        let (base_token, alt_token) = (base_token.as_ref(), alt_token.as_ref());
        if base_token != alt_token {
            alignment.mismatches.push(Mismatch {
                index,
                base: base_token,
                alt: alt_token,
            });
        }
    }

    alignment
}
