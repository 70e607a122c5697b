use super::EditResult;
use super::line::classify;
use super::text::{
    char_len, common_prefix_chars, line_count, line_span_at, replace_chars, slice_chars,
};

/// Remove a bare list marker in one step instead of char by char.
///
/// Fires when the deletion leaves the edited line as a bare marker
/// (`"- x"` to `"- "`), or when it eats into a line that was one
/// (`"- "` to `"-"`). Deletions that join lines are left alone.
pub(super) fn clear_bare_marker(old_text: &str, new_text: &str) -> Option<EditResult> {
    if line_count(old_text) != line_count(new_text) {
        return None;
    }

    let at = common_prefix_chars(old_text, new_text).min(char_len(new_text));
    let new_span = line_span_at(new_text, at);
    let old_span = line_span_at(old_text, at);
    let new_line = slice_chars(new_text, new_span.start, new_span.end);
    let old_line = slice_chars(old_text, old_span.start, old_span.end);

    if !classify(new_line).is_bare_marker() && !classify(old_line).is_bare_marker() {
        return None;
    }
    if new_line.is_empty() {
        return None;
    }

    Some(EditResult {
        text: replace_chars(new_text, new_span.start, new_span.end, ""),
        cursor: new_span.start,
        handled: true,
    })
}
