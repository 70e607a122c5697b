use super::EditResult;
use super::line::classify;
use super::text::{char_len, insert_chars, line_span_at, replace_chars, slice_chars};

/// Continue or close the list item split by the newline at `at`.
///
/// `text` already contains the newline. The head of the split line decides
/// the outcome; the tail only matters when deciding whether the item was
/// empty.
pub(super) fn continue_list(text: &str, at: usize) -> Option<EditResult> {
    let head_span = line_span_at(text, at);
    let tail_span = line_span_at(text, at + 1);
    let head = slice_chars(text, head_span.start, at);
    let tail = slice_chars(text, tail_span.start, tail_span.end);

    let kind = classify(head);
    if !kind.is_list() {
        return None;
    }

    if kind.has_empty_content() && tail.trim().is_empty() {
        // Enter on an empty item leaves the list.
        return Some(EditResult {
            text: replace_chars(text, head_span.start, at, ""),
            cursor: head_span.start + 1,
            handled: true,
        });
    }

    let prefix = kind.continuation()?;
    let insert_at = at + 1;
    Some(EditResult {
        text: insert_chars(text, insert_at, &prefix),
        cursor: insert_at + char_len(&prefix),
        handled: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(text: &str, at: usize) -> Option<(String, usize)> {
        continue_list(text, at).map(|r| (r.text, r.cursor))
    }

    #[test]
    fn test_bullet_continues() {
        assert_eq!(enter("- hello\n", 7), Some(("- hello\n- ".to_string(), 10)));
    }

    #[test]
    fn test_star_bullet_keeps_marker_and_indent() {
        assert_eq!(
            enter("  * a\n", 5),
            Some(("  * a\n  * ".to_string(), 10))
        );
    }

    #[test]
    fn test_empty_bullet_is_removed() {
        assert_eq!(enter("- \n", 2), Some(("\n".to_string(), 1)));
    }

    #[test]
    fn test_empty_numbered_is_removed() {
        assert_eq!(enter("a\n2. \n", 5), Some(("a\n\n".to_string(), 3)));
    }

    #[test]
    fn test_whitespace_only_bullet_is_removed() {
        assert_eq!(enter("-    \n", 5), Some(("\n".to_string(), 1)));
    }

    #[test]
    fn test_trailing_whitespace_after_content_continues() {
        assert_eq!(
            enter("- text   \n", 9),
            Some(("- text   \n- ".to_string(), 12))
        );
    }

    #[test]
    fn test_numbered_increments() {
        assert_eq!(enter("3. item\n", 7), Some(("3. item\n4. ".to_string(), 11)));
    }

    #[test]
    fn test_plain_line_is_not_handled() {
        assert_eq!(enter("hello\n", 5), None);
    }

    #[test]
    fn test_mid_line_split_prefixes_remainder() {
        // "- hello world" split after "hello"
        assert_eq!(
            enter("- hello\n world", 7),
            Some(("- hello\n-  world".to_string(), 10))
        );
    }

    #[test]
    fn test_split_right_after_marker_adds_item_above() {
        assert_eq!(
            enter("- \nhello", 2),
            Some(("- \n- hello".to_string(), 5))
        );
    }

    #[test]
    fn test_split_inside_marker_is_not_handled() {
        assert_eq!(enter("-\n hello", 1), None);
    }

    #[test]
    fn test_split_before_indent_is_not_handled() {
        assert_eq!(enter("\n- hello", 0), None);
    }

    #[test]
    fn test_only_preceding_line_is_inspected() {
        assert_eq!(
            enter("1. a\n2. b\nbreak\n7. c\n", 20),
            Some(("1. a\n2. b\nbreak\n7. c\n8. ".to_string(), 24))
        );
    }
}
