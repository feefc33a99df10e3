//! Whitespace tokenization with double-space protection.
//!
//! A run of two spaces inside a sentence carries formatting that plain
//! whitespace splitting would throw away, so it is swapped for a sentinel
//! token before splitting and swapped back once resolution is done.

/// Sentinel token standing in for a protected two-space run.
pub const DOUBLE_SPACE_MARKER: &str = "~~DOUBLESPACE~~";

/// The marker as it appears inline, with its padding spaces.
const PADDED_MARKER: &str = " ~~DOUBLESPACE~~ ";

/// Replace every two-space run not preceded by `\n` or `.` with the marker.
///
/// Runs are consumed left to right without overlap; the preceding character
/// is always taken from the original text, and a run at the very start counts.
pub fn protect_double_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ' ' && chars.peek() == Some(&' ') && !matches!(prev, Some('\n' | '.')) {
            chars.next();
            out.push_str(PADDED_MARKER);
            prev = Some(' ');
            continue;
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

/// Turn every padded marker back into two spaces.
pub fn restore_double_spaces(text: &str) -> String {
    text.replace(PADDED_MARKER, "  ")
}

/// Split already-protected text into tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Protect double spaces, then split on whitespace.
pub fn normalize_and_tokenize(text: &str) -> Vec<String> {
    let protected = protect_double_spaces(text);
    tokenize(&protected).into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(normalize_and_tokenize("").is_empty());
        assert!(normalize_and_tokenize(" \n\t").is_empty());
    }

    #[test]
    fn mid_sentence_double_space_becomes_marker() {
        let tokens = normalize_and_tokenize("one  two three");
        assert_eq!(tokens, vec!["one", DOUBLE_SPACE_MARKER, "two", "three"]);
    }

    #[test]
    fn double_space_after_period_or_newline_is_plain_whitespace() {
        let tokens = normalize_and_tokenize("Done.  Next\n  line");
        assert_eq!(tokens, vec!["Done.", "Next", "line"]);
    }

    #[test]
    fn leading_double_space_is_protected() {
        assert_eq!(protect_double_spaces("  Hi"), " ~~DOUBLESPACE~~ Hi");
    }

    #[test]
    fn runs_are_consumed_without_overlap() {
        assert_eq!(
            protect_double_spaces("a    b"),
            "a ~~DOUBLESPACE~~  ~~DOUBLESPACE~~ b"
        );
        assert_eq!(protect_double_spaces("a   b"), "a ~~DOUBLESPACE~~  b");
    }

    #[test]
    fn protect_then_restore_is_lossless() {
        for text in [
            "plain text",
            "two  spaces here",
            "  leading",
            "three   and four    spaces",
            "Stop.  Start\n  indent",
        ] {
            assert_eq!(restore_double_spaces(&protect_double_spaces(text)), text);
        }
    }

    #[test]
    fn rejoined_tokens_keep_double_spaces() {
        let text = "keep  this gap";
        let joined = normalize_and_tokenize(text).join(" ");
        assert_eq!(restore_double_spaces(&joined), text);
    }
}
