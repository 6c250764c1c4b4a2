// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cleanup of raw OCR output.

/// Unicode whitespace plus the ASCII file/group/record/unit separators
/// (U+001C..=U+001F), which also count as blank here.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Trim every line and drop the ones that end up empty, keeping order.
pub fn clean_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(|line| line.trim_matches(is_blank_char))
        .filter(|line| !line.is_empty())
        .collect()
}

/// [`clean_lines`] joined with `\n`, without a trailing newline.
pub fn clean_text(raw: &str) -> String {
    clean_lines(raw).join("\n")
}

/// The first `max_chars` characters of `text`, with `...` appended when
/// anything was cut off.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_and_whitespace_lines() {
        let raw = ["Hello", "  ", "World  ", ""].join("\n");
        assert_eq!(clean_text(&raw), "Hello\nWorld");
    }

    #[test]
    fn keeps_order_and_count_of_non_empty_lines() {
        let raw = "\n\t first\n\n second \n   \n\u{3000}第三行\u{3000}\n\n";
        let lines = clean_lines(raw);
        assert_eq!(lines, vec!["first", "second", "第三行"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        assert_eq!(clean_text("a\r\n\r\n b\r\n"), "a\nb");
    }

    #[test]
    fn empty_and_blank_input_yield_empty_text() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t\n \x0c"), "");
    }

    #[test]
    fn separator_controls_count_as_blank() {
        let raw = "\u{1c}\u{1d}\u{1e}\u{1f}\n\u{1f}word\u{1c}\n \u{1e} \nnext";
        assert_eq!(clean_lines(raw), vec!["word", "next"]);
    }

    #[test]
    fn other_controls_are_kept() {
        assert_eq!(clean_lines("\u{1b}esc\u{7}"), vec!["\u{1b}esc\u{7}"]);
    }

    #[test]
    fn no_trailing_newline() {
        assert!(!clean_text("one\ntwo\n").ends_with('\n'));
    }

    #[test]
    fn preview_short_text_is_unchanged() {
        assert_eq!(preview("short", 300), "short");
        assert_eq!(preview("exact", 5), "exact");
    }

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(preview("你好世界", 2), "你好...");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
