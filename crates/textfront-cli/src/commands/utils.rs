//! Shared helpers for CLI commands.

use colored::*;

/// Truncate to at most `max_chars` characters, adding "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_chars).collect()
    }
}

/// Printable form of a symbol; whitespace and combining marks are escaped.
pub fn display_symbol(symbol: char) -> String {
    match symbol {
        ' ' => "<space>".to_string(),
        c if c.is_whitespace() || c.is_control() => c.escape_unicode().to_string(),
        // combining marks render on top of the previous column
        '\u{0300}'..='\u{036f}' => format!("◌{}", symbol),
        c => c.to_string(),
    }
}

/// Error rate colored by how intelligible it suggests the audio is.
pub fn format_score(score: f64) -> ColoredString {
    let text = format!("{:.5}", score);
    if score <= 0.05 {
        text.green()
    } else if score <= 0.2 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Join ids as a space-separated list.
pub fn format_ids(ids: &[usize]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("ㅇㅏㄴㄴㅕㅇ", 5), "ㅇㅏ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_display_symbol() {
        assert_eq!(display_symbol(' '), "<space>");
        assert_eq!(display_symbol('ə'), "ə");
        assert_eq!(display_symbol('\u{0329}'), "◌\u{0329}");
    }

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(&[1, 20, 3]), "1 20 3");
        assert_eq!(format_ids(&[]), "");
    }
}
