//! Char-offset helpers shared by the continuation rules.
//!
//! Every offset in this module counts Unicode scalar values, matching the
//! host buffer's rope indexing.

/// Char span `[start, end)` of one line, excluding its trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `char_idx`-th char, or `text.len()` past the end.
pub fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}

pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let from = byte_index(text, start);
    let to = byte_index(text, end.max(start));
    &text[from..to]
}

/// Replace the chars in `[start, end)` with `with`.
pub fn replace_chars(text: &str, start: usize, end: usize, with: &str) -> String {
    let from = byte_index(text, start);
    let to = byte_index(text, end.max(start));
    let mut out = String::with_capacity(text.len() - (to - from) + with.len());
    out.push_str(&text[..from]);
    out.push_str(with);
    out.push_str(&text[to..]);
    out
}

pub fn insert_chars(text: &str, at: usize, with: &str) -> String {
    replace_chars(text, at, at, with)
}

/// The line containing `char_idx`.
///
/// An offset that sits on a `\n` belongs to the line that newline ends.
pub fn line_span_at(text: &str, char_idx: usize) -> LineSpan {
    let mut start = 0;
    let mut len = 0;
    for (idx, ch) in text.chars().enumerate() {
        len = idx + 1;
        if ch == '\n' {
            if idx < char_idx {
                start = idx + 1;
            } else {
                return LineSpan { start, end: idx };
            }
        }
    }
    LineSpan { start, end: len }
}

pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// Number of leading chars shared by `a` and `b`.
pub fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// The run of spaces and tabs at the start of `line`.
pub fn leading_indent(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_handles_multibyte() {
        let text = "café!";
        assert_eq!(byte_index(text, 3), 3);
        assert_eq!(byte_index(text, 4), 5);
        assert_eq!(byte_index(text, 99), text.len());
    }

    #[test]
    fn test_line_span_at_middle_line() {
        let text = "one\ntwo\nthree";
        assert_eq!(line_span_at(text, 5), LineSpan { start: 4, end: 7 });
    }

    #[test]
    fn test_line_span_at_newline_belongs_to_previous_line() {
        let text = "one\ntwo";
        assert_eq!(line_span_at(text, 3), LineSpan { start: 0, end: 3 });
    }

    #[test]
    fn test_line_span_at_trailing_empty_line() {
        let text = "one\n";
        assert_eq!(line_span_at(text, 4), LineSpan { start: 4, end: 4 });
    }

    #[test]
    fn test_line_span_at_empty_text() {
        assert_eq!(line_span_at("", 0), LineSpan { start: 0, end: 0 });
    }

    #[test]
    fn test_replace_chars_multibyte() {
        assert_eq!(replace_chars("- é\n", 2, 3, "e"), "- e\n");
    }

    #[test]
    fn test_common_prefix_chars() {
        assert_eq!(common_prefix_chars("- a", "- "), 2);
        assert_eq!(common_prefix_chars("", "x"), 0);
    }

    #[test]
    fn test_leading_indent_mixed() {
        assert_eq!(leading_indent(" \t - x"), " \t ");
        assert_eq!(leading_indent("x"), "");
        assert_eq!(leading_indent("   "), "   ");
    }
}
