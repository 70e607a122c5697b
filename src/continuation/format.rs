//! Toolbar formatting actions.
//!
//! Each action is a total function from `(text, selection)` to a new
//! `(text, selection)`. The caller passes the buffer it wants changed; the
//! actions never look anything up on their own.

use super::line::{LineKind, classify};
use super::text::{
    char_len, insert_chars, leading_indent, line_span_at, replace_chars, slice_chars,
};

/// One indentation step.
pub const INDENT_UNIT: &str = "    ";

/// A char-offset selection. `start == end` is a plain caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection between two offsets, in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    fn map(self, f: impl Fn(usize) -> usize) -> Self {
        Self::new(f(self.start), f(self.end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    pub text: String,
    pub selection: Selection,
}

impl FormatResult {
    fn unchanged(text: &str, selection: Selection) -> Self {
        Self {
            text: text.to_string(),
            selection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Bullet,
    NumberedList,
    Heading,
    Bold,
    Italic,
    IncreaseIndent,
    DecreaseIndent,
}

impl FormatAction {
    pub fn apply(self, text: &str, selection: Selection) -> FormatResult {
        match self {
            Self::Bullet => insert_bullet(text, selection),
            Self::NumberedList => insert_numbered_list(text, selection),
            Self::Heading => insert_heading(text, selection),
            Self::Bold => format_bold(text, selection),
            Self::Italic => format_italic(text, selection),
            Self::IncreaseIndent => increase_indent(text, selection),
            Self::DecreaseIndent => decrease_indent(text, selection),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bullet => "bullet",
            Self::NumberedList => "numbered list",
            Self::Heading => "heading",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::IncreaseIndent => "indent",
            Self::DecreaseIndent => "outdent",
        }
    }
}

pub fn insert_bullet(text: &str, selection: Selection) -> FormatResult {
    insert_line_prefix(text, selection, "- ", |line| {
        matches!(classify(line), LineKind::Bullet { .. })
    })
}

pub fn insert_numbered_list(text: &str, selection: Selection) -> FormatResult {
    insert_line_prefix(text, selection, "1. ", |line| {
        matches!(classify(line), LineKind::Numbered { .. })
    })
}

pub fn insert_heading(text: &str, selection: Selection) -> FormatResult {
    insert_line_prefix(text, selection, "# ", is_heading)
}

/// Wrap the selection in `**`, or drop an empty `****` pair at the caret.
pub fn format_bold(text: &str, selection: Selection) -> FormatResult {
    wrap_selection(text, selection, "**", is_bold)
}

/// Wrap the selection in `*`, or drop an empty `**` pair at the caret.
pub fn format_italic(text: &str, selection: Selection) -> FormatResult {
    wrap_selection(text, selection, "*", is_italic)
}

/// Prepend one [`INDENT_UNIT`] to the line holding the selection start.
pub fn increase_indent(text: &str, selection: Selection) -> FormatResult {
    let selection = selection.clamped(char_len(text));
    let span = line_span_at(text, selection.start);
    let width = char_len(INDENT_UNIT);
    FormatResult {
        text: insert_chars(text, span.start, INDENT_UNIT),
        selection: selection.map(|offset| {
            if offset >= span.start {
                offset + width
            } else {
                offset
            }
        }),
    }
}

/// Remove one indentation step from the line holding the selection start.
///
/// Prefers a full [`INDENT_UNIT`], then a single tab, then up to two
/// leading spaces.
pub fn decrease_indent(text: &str, selection: Selection) -> FormatResult {
    let selection = selection.clamped(char_len(text));
    let span = line_span_at(text, selection.start);
    let line = slice_chars(text, span.start, span.end);

    let removed = if line.starts_with(INDENT_UNIT) {
        char_len(INDENT_UNIT)
    } else if line.starts_with('\t') {
        1
    } else {
        line.chars().take(2).take_while(|c| *c == ' ').count()
    };
    if removed == 0 {
        return FormatResult::unchanged(text, selection);
    }

    FormatResult {
        text: replace_chars(text, span.start, span.start + removed, ""),
        selection: selection.map(|offset| {
            if offset < span.start {
                offset
            } else {
                offset.saturating_sub(removed).max(span.start)
            }
        }),
    }
}

fn insert_line_prefix(
    text: &str,
    selection: Selection,
    prefix: &str,
    already_prefixed: impl Fn(&str) -> bool,
) -> FormatResult {
    let prefix_len = char_len(prefix);
    if text.is_empty() {
        return FormatResult {
            text: prefix.to_string(),
            selection: Selection::caret(prefix_len),
        };
    }

    let selection = selection.clamped(char_len(text));
    let span = line_span_at(text, selection.start);
    let line = slice_chars(text, span.start, span.end);
    if already_prefixed(line) {
        return FormatResult::unchanged(text, selection);
    }

    let at = span.start + char_len(leading_indent(line));
    FormatResult {
        text: insert_chars(text, at, prefix),
        selection: selection.map(|offset| {
            if offset >= at {
                offset + prefix_len
            } else {
                offset
            }
        }),
    }
}

fn wrap_selection(
    text: &str,
    selection: Selection,
    delimiter: &str,
    already_wrapped: fn(&str) -> bool,
) -> FormatResult {
    let selection = selection.clamped(char_len(text));
    let width = char_len(delimiter);

    if selection.is_empty() {
        let pair = delimiter.repeat(2);
        return FormatResult {
            text: insert_chars(text, selection.start, &pair),
            selection: Selection::caret(selection.start + width),
        };
    }

    let selected = slice_chars(text, selection.start, selection.end);
    if already_wrapped(selected) {
        return FormatResult::unchanged(text, selection);
    }

    let wrapped = format!("{delimiter}{selected}{delimiter}");
    FormatResult {
        text: replace_chars(text, selection.start, selection.end, &wrapped),
        selection: Selection::new(selection.start, selection.end + 2 * width),
    }
}

fn is_heading(line: &str) -> bool {
    let rest = leading_indent(line).len();
    let hashes = line[rest..].chars().take_while(|c| *c == '#').count();
    hashes > 0 && line[rest + hashes..].starts_with(' ')
}

fn is_bold(s: &str) -> bool {
    s.len() > 4 && s.starts_with("**") && s.ends_with("**")
}

fn is_italic(s: &str) -> bool {
    let single = s.len() > 2 && s.starts_with('*') && s.ends_with('*');
    let triple = s.len() > 6 && s.starts_with("***") && s.ends_with("***");
    single && (!is_bold(s) || triple)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(offset: usize) -> Selection {
        Selection::caret(offset)
    }

    // --- Line prefixes ---

    #[test]
    fn test_insert_bullet_into_empty_buffer() {
        let result = insert_bullet("", caret(0));
        assert_eq!(result.text, "- ");
        assert_eq!(result.selection, caret(2));
    }

    #[test]
    fn test_insert_numbered_into_empty_buffer() {
        let result = insert_numbered_list("", caret(0));
        assert_eq!(result.text, "1. ");
        assert_eq!(result.selection, caret(3));
    }

    #[test]
    fn test_insert_heading_at_line_start() {
        let result = insert_heading("intro\ntitle", caret(8));
        assert_eq!(result.text, "intro\n# title");
        assert_eq!(result.selection, caret(10));
    }

    #[test]
    fn test_insert_bullet_after_indentation() {
        let result = insert_bullet("    item", caret(6));
        assert_eq!(result.text, "    - item");
        assert_eq!(result.selection, caret(8));
    }

    #[test]
    fn test_insert_bullet_on_trailing_empty_line_appends() {
        let result = insert_bullet("text\n", caret(5));
        assert_eq!(result.text, "text\n- ");
        assert_eq!(result.selection, caret(7));
    }

    #[test]
    fn test_insert_bullet_is_idempotent() {
        let once = insert_bullet("item", caret(4));
        let twice = insert_bullet(&once.text, once.selection);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_insert_heading_is_idempotent_for_any_level() {
        let result = insert_heading("## Notes", caret(3));
        assert_eq!(result.text, "## Notes");
    }

    #[test]
    fn test_insert_prefix_leaves_earlier_offsets_alone() {
        let result = insert_numbered_list("  cd", Selection::new(1, 4));
        assert_eq!(result.text, "  1. cd");
        assert_eq!(result.selection, Selection::new(1, 7));
    }

    // --- Emphasis ---

    #[test]
    fn test_bold_wraps_selection() {
        let result = format_bold("hi", Selection::new(0, 2));
        assert_eq!(result.text, "**hi**");
        assert_eq!(result.selection, Selection::new(0, 6));
    }

    #[test]
    fn test_bold_on_empty_buffer_places_caret_in_middle() {
        let result = format_bold("", caret(0));
        assert_eq!(result.text, "****");
        assert_eq!(result.selection, caret(2));
    }

    #[test]
    fn test_italic_wraps_selection_mid_text() {
        let result = format_italic("say hi now", Selection::new(4, 6));
        assert_eq!(result.text, "say *hi* now");
        assert_eq!(result.selection, Selection::new(4, 8));
    }

    #[test]
    fn test_italic_with_caret_inserts_pair() {
        let result = format_italic("ab", caret(1));
        assert_eq!(result.text, "a**b");
        assert_eq!(result.selection, caret(2));
    }

    #[test]
    fn test_bold_is_idempotent_on_wrapped_selection() {
        let once = format_bold("hi", Selection::new(0, 2));
        let twice = format_bold(&once.text, once.selection);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_italic_wraps_bold_text() {
        let result = format_italic("**hi**", Selection::new(0, 6));
        assert_eq!(result.text, "***hi***");
    }

    #[test]
    fn test_italic_is_idempotent_on_wrapped_selection() {
        let once = format_italic("hi", Selection::new(0, 2));
        let twice = format_italic(&once.text, once.selection);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_bold_multibyte_selection() {
        let result = format_bold("café", Selection::new(2, 4));
        assert_eq!(result.text, "ca**fé**");
        assert_eq!(result.selection, Selection::new(2, 8));
    }

    // --- Indentation ---

    #[test]
    fn test_increase_indent_shifts_cursor() {
        let result = increase_indent("a\n- b", caret(4));
        assert_eq!(result.text, "a\n    - b");
        assert_eq!(result.selection, caret(8));
    }

    #[test]
    fn test_decrease_indent_removes_unit() {
        let result = decrease_indent("      x", caret(7));
        assert_eq!(result.text, "  x");
        assert_eq!(result.selection, caret(3));
    }

    #[test]
    fn test_decrease_indent_removes_tab() {
        let result = decrease_indent("\t\tx", caret(2));
        assert_eq!(result.text, "\tx");
        assert_eq!(result.selection, caret(1));
    }

    #[test]
    fn test_decrease_indent_removes_short_space_run() {
        let result = decrease_indent("  x", caret(3));
        assert_eq!(result.text, "x");
        assert_eq!(result.selection, caret(1));
    }

    #[test]
    fn test_decrease_indent_strips_at_most_two_spaces() {
        let result = decrease_indent("   x", caret(4));
        assert_eq!(result.text, " x");
        assert_eq!(result.selection, caret(2));
    }

    #[test]
    fn test_decrease_indent_clamps_cursor_to_line_start() {
        let result = decrease_indent("top\n    x", caret(6));
        assert_eq!(result.text, "top\nx");
        assert_eq!(result.selection, caret(4));
    }

    #[test]
    fn test_decrease_indent_without_indent_is_noop() {
        let result = decrease_indent("x", caret(1));
        assert_eq!(result.text, "x");
        assert_eq!(result.selection, caret(1));
    }

    #[test]
    fn test_format_action_dispatch() {
        let result = FormatAction::Heading.apply("", caret(0));
        assert_eq!(result.text, "# ");
        assert_eq!(FormatAction::DecreaseIndent.label(), "outdent");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn indent_round_trip_restores_line_and_cursor(
                lines in proptest::collection::vec("[ \ta-z\\-*.0-9]{0,10}", 1..5),
                line_idx in 0..5usize,
                col in 0..12usize,
            ) {
                let text = lines.join("\n");
                let line_idx = line_idx.min(lines.len() - 1);
                let line_start: usize = lines[..line_idx].iter().map(|l| l.chars().count() + 1).sum();
                let cursor = line_start + col.min(lines[line_idx].chars().count());

                let indented = increase_indent(&text, Selection::caret(cursor));
                let restored = decrease_indent(&indented.text, indented.selection);
                prop_assert_eq!(restored.text, text);
                prop_assert_eq!(restored.selection, Selection::caret(cursor));
            }

            #[test]
            fn empty_selection_emphasis_grows_by_pair(
                text in "[a-z ]{0,20}",
                at in 0..21usize,
            ) {
                let at = at.min(text.chars().count());
                let bold = format_bold(&text, Selection::caret(at));
                prop_assert_eq!(bold.text.chars().count(), text.chars().count() + 4);
                prop_assert_eq!(bold.selection, Selection::caret(at + 2));
            }
        }
    }
}
