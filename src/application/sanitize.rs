//! # ANSI Sanitizer
//!
//! Strips SGR color/style sequences (`ESC [ digits-or-semicolons m`) from scanner output.
//! Every other byte, including other control characters, is left untouched.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static SGR_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is valid"));

pub fn strip_ansi(input: &str) -> String {
    let mut current = Cow::Borrowed(input);
    // Removing one sequence can splice together another (`ESC[ESC[0mm`), so run to a fixed point.
    while SGR_SEQUENCE.is_match(&current) {
        current = Cow::Owned(SGR_SEQUENCE.replace_all(&current, "").into_owned());
    }
    current.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_colors() {
        assert_eq!(strip_ansi("\x1b[32mOK\x1b[0m"), "OK");
        assert_eq!(
            strip_ansi("https://example.com [\x1b[1;34m200\x1b[0m] [\x1b[35mnginx\x1b[m]"),
            "https://example.com [200] [nginx]"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_ansi(""), "");
        assert_eq!(strip_ansi("https://example.com\n"), "https://example.com\n");
    }

    #[test]
    fn test_other_control_sequences_preserved() {
        // Erase-line and cursor moves are not SGR.
        assert_eq!(strip_ansi("a\x1b[2Kb"), "a\x1b[2Kb");
        assert_eq!(strip_ansi("a\x1b[1Ab\t\r\n"), "a\x1b[1Ab\t\r\n");
        // Incomplete sequence.
        assert_eq!(strip_ansi("x\x1b[31"), "x\x1b[31");
        // Non-digit parameter.
        assert_eq!(strip_ansi("\x1b[?25mz"), "\x1b[?25mz");
    }

    #[test]
    fn test_spliced_sequence_removed() {
        assert_eq!(strip_ansi("\x1b[\x1b[31mmred"), "red");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "\x1b[32mOK\x1b[0m",
            "\x1b[\x1b[\x1b[0mmm",
            "a\x1b[2Kb\x1b[;m",
            "\x1b[31m\u{1F600}\x1b[0m multi-byte",
        ];
        for sample in samples {
            let once = strip_ansi(sample);
            assert_eq!(strip_ansi(&once), once, "not idempotent for {sample:?}");
            assert!(!SGR_SEQUENCE.is_match(&once));
        }
    }
}
