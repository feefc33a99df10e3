//! Post-processing passes applied to every description, merged or not.
//!
//! Each pass is a function `&str -> String` applied in sequence.

use std::sync::LazyLock;

use regex::Regex;

/// Run every pass over `text`.
pub fn finalize(text: &str) -> String {
    let mut result = strip_html_tags(text);
    result = fix_single_quotes(&result);
    result
}

// ---------------------------------------------------------------------------
// Pass 1: Strip leaked HTML tags
// ---------------------------------------------------------------------------

/// Remove anything shaped like a tag. Textual only: a `<` ... `>` pair in
/// prose on the same line goes too.
pub fn strip_html_tags(text: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<.*?>").expect("valid regex"));

    TAG_RE.replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Straighten curly single quotes
// ---------------------------------------------------------------------------

/// Replace U+2018 and U+2019 with an ASCII apostrophe.
pub fn fix_single_quotes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_content() {
        let input = "Intro <em>loud</em> and <br/>done";
        assert_eq!(strip_html_tags(input), "Intro loud and done");
    }

    #[test]
    fn tag_match_is_non_greedy_and_single_line() {
        assert_eq!(strip_html_tags("a <b> c <d> e"), "a  c  e");
        assert_eq!(strip_html_tags("a < b\nc > d"), "a < b\nc > d");
    }

    #[test]
    fn fixes_curly_quotes() {
        let input = "\u{2018}Tis the season, isn\u{2019}t it";
        assert_eq!(fix_single_quotes(input), "'Tis the season, isn't it");
    }

    #[test]
    fn finalize_is_idempotent() {
        for input in [
            "<p>It\u{2019}s <strong>here</strong></p>",
            "<<nested>> tags",
            "no markup at all",
            "broken <tag\nacross> lines",
        ] {
            let once = finalize(input);
            assert_eq!(finalize(&once), once);
        }
    }

    #[test]
    fn finalize_output_has_no_curly_quotes_or_tags() {
        let out = finalize("<div>\u{2018}quoted\u{2019}</div>");
        assert_eq!(out, "'quoted'");
    }
}
