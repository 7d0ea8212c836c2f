// src/core/text.rs
// Tokenizing helpers shared by the page parsers.

/// Rendered body text, split into trimmed, non-empty lines.
pub fn non_blank_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Up to `max_chars` characters starting at byte offset `start`.
/// `start` must lie on a char boundary (it comes from `find` of an ASCII
/// needle); counting chars instead of bytes keeps the window from splitting
/// an umlaut.
pub fn char_window(s: &str, start: usize, max_chars: usize) -> String {
    s[start..].chars().take(max_chars).collect()
}

/// Team short codes render as a lone all-caps token of at most three chars
/// ("CG", "VBB"). Digits are tolerated, lowercase is not.
pub fn is_short_code(line: &str) -> bool {
    let len = line.chars().count();
    (1..=3).contains(&len)
        && line.chars().any(|c| c.is_alphabetic())
        && !line.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_trimmed_and_blank_free() {
        let got = non_blank_lines("  a \n\n\t\nb\n   \nc  ");
        assert_eq!(got, vec!["a", "b", "c"]);
    }

    #[test]
    fn window_counts_chars_not_bytes() {
        let s = "äöü1234";
        assert_eq!(char_window(s, 0, 4), "äöü1");
        assert_eq!(char_window(s, 0, 99), s);
    }

    #[test]
    fn short_code_shapes() {
        assert!(is_short_code("CG"));
        assert!(is_short_code("VBB"));
        assert!(is_short_code("A1"));
        assert!(!is_short_code("Cg"));
        assert!(!is_short_code("ABCD"));
        assert!(!is_short_code("12"));
        assert!(!is_short_code(""));
    }
}
