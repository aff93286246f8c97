use regex::Regex;
use std::sync::LazyLock;

/// Anything outside tab, LF, CR, and printable ASCII.
static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x09\x0a\x0d\x20-\x7E]").expect("failed to compile regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("failed to compile regex"));

/// Clean raw OCR engine output into a normalized string.
///
/// Tesseract emits a form feed as a page-break marker and occasionally
/// stray control or non-ASCII bytes; both become spaces, then whitespace
/// runs collapse to a single space and the ends are trimmed. The result
/// contains only printable ASCII and is stable under re-application.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = raw.replace('\x0c', " ");
    let text = NON_PRINTABLE.replace_all(&text, " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize_text("a\n\n  b"), "a b");
    }

    #[test]
    fn test_replaces_form_feed() {
        assert_eq!(normalize_text("page one\x0cpage two"), "page one page two");
    }

    #[test]
    fn test_strips_non_printable_characters() {
        assert_eq!(normalize_text("he\u{0}llo\u{7f}"), "he llo");
        assert_eq!(normalize_text("caf\u{e9} au lait"), "caf au lait");
    }

    #[test]
    fn test_trims_ends() {
        assert_eq!(normalize_text("  text  "), "text");
        assert_eq!(normalize_text("\n\t\r"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "already clean",
            "a\n\n  b",
            "\x0c\x0c",
            "  \u{1}mixed\u{fffd} junk\t\twith   runs  ",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_output_charset_invariant() {
        let noisy = "\u{0}\u{1b}weird\u{2028}bytes\u{9}\nhere\u{c}";
        let cleaned = normalize_text(noisy);
        assert!(
            cleaned
                .chars()
                .all(|c| c == '\t' || c == '\n' || c == '\r' || ('\x20'..='\x7e').contains(&c)),
            "unexpected character in {cleaned:?}"
        );
    }
}
