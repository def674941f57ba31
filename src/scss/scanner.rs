//! Depth-aware text scanning
//!
//! Both parsers need to find separators (`,`, `:`, `;`) and matching
//! delimiters without being fooled by nested function calls, sub-maps,
//! blocks or quoted strings. The helpers here walk text character by
//! character and only report positions at nesting depth zero.

/// Tracks nesting of `()`, `[]`, `{}` and quoted strings while walking text.
///
/// Unbalanced closing delimiters saturate at zero instead of failing, scanning
/// is best-effort and malformed input is left for the compiler to reject.
#[derive(Debug, Default, Clone)]
pub struct DepthTracker {
    parens: usize,
    brackets: usize,
    braces: usize,
    quote: Option<char>,
    escaped: bool,
}

impl DepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the tracker past `ch`
    pub fn feed(&mut self, ch: char) {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == quote {
                self.quote = None;
            }
            return;
        }

        match ch {
            '"' | '\'' => self.quote = Some(ch),
            '(' => self.parens += 1,
            ')' => self.parens = self.parens.saturating_sub(1),
            '[' => self.brackets += 1,
            ']' => self.brackets = self.brackets.saturating_sub(1),
            '{' => self.braces += 1,
            '}' => self.braces = self.braces.saturating_sub(1),
            _ => {}
        }
    }

    /// True when outside any string and any delimiter pair
    pub fn is_top_level(&self) -> bool {
        self.quote.is_none() && self.parens == 0 && self.brackets == 0 && self.braces == 0
    }

    pub fn in_string(&self) -> bool {
        self.quote.is_some()
    }
}

/// Split `text` on every `separator` found at depth zero.
///
/// Returned slices are not trimmed. An empty input yields a single empty slice.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut tracker = DepthTracker::new();
    let mut start = 0;

    for (index, ch) in text.char_indices() {
        if ch == separator && tracker.is_top_level() {
            parts.push(&text[start..index]);
            start = index + ch.len_utf8();
            continue;
        }
        tracker.feed(ch);
    }

    parts.push(&text[start..]);
    parts
}

/// Byte offset of the first `target` at depth zero
pub fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut tracker = DepthTracker::new();

    for (index, ch) in text.char_indices() {
        if ch == target && tracker.is_top_level() {
            return Some(index);
        }
        tracker.feed(ch);
    }

    None
}

/// Byte offset of the delimiter closing the one that opens at `open_index`.
///
/// Returns `None` when `open_index` is not an opening delimiter or the text
/// ends before the delimiter is closed.
pub fn find_matching(text: &str, open_index: usize) -> Option<usize> {
    let open = text[open_index..].chars().next()?;
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => return None,
    };

    let mut tracker = DepthTracker::new();
    let mut depth = 0usize;

    for (offset, ch) in text[open_index..].char_indices() {
        if !tracker.in_string() {
            if ch == open {
                depth += 1;
            } else if ch == close {
                depth -= 1;
                if depth == 0 {
                    return Some(open_index + offset);
                }
            }
        }
        tracker.feed(ch);
    }

    None
}

/// Remove one pair of surrounding single or double quotes, if present
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return &text[1..text.len() - 1];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_nested_commas() {
        let parts = split_top_level("a: foo(1,2), b: 3", ',');
        assert_eq!(parts, vec!["a: foo(1,2)", " b: 3"]);
    }

    #[test]
    fn test_split_ignores_quoted_separators() {
        let parts = split_top_level(r#"font: "a, b", size: [1, 2]"#, ',');
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], r#"font: "a, b""#);
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_top_level("", ','), vec![""]);
    }

    #[test]
    fn test_find_top_level_skips_nested_colon() {
        let text = "(a: 1): 2";
        assert_eq!(find_top_level(text, ':'), Some(6));
        assert_eq!(find_top_level("no separator", ';'), None);
    }

    #[test]
    fn test_find_matching_nested() {
        let text = "(a: (b: 1), c: ')')";
        assert_eq!(find_matching(text, 0), Some(text.len() - 1));
        assert_eq!(find_matching(text, 4), Some(9));
    }

    #[test]
    fn test_find_matching_unbalanced() {
        assert_eq!(find_matching("(a: (1, 2)", 0), None);
        assert_eq!(find_matching("abc", 0), None);
    }

    #[test]
    fn test_unbalanced_close_saturates() {
        let mut tracker = DepthTracker::new();
        for ch in "))a".chars() {
            tracker.feed(ch);
        }
        assert!(tracker.is_top_level());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"primary\""), "primary");
        assert_eq!(unquote("'primary'"), "primary");
        assert_eq!(unquote("\"primary'"), "\"primary'");
        assert_eq!(unquote("\""), "\"");
    }
}
