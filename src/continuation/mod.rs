//! Markdown list continuation.
//!
//! A pure text-transformation engine. The host hands over the buffer
//! before and after a raw edit plus the cursor before the edit, and gets
//! back either "not handled" or a corrected buffer and cursor:
//!
//! - Enter at the end of a list item starts the next item (`- `, `* `,
//!   or the next number).
//! - Enter on an empty item removes its marker and leaves the list.
//! - Backspace into a bare marker removes the whole marker.
//!
//! All offsets count Unicode scalar values (`char`s). The engine keeps no
//! state between calls and performs no I/O.
//!
//! The [`format`] submodule holds the toolbar-style formatting actions
//! (bullets, headings, emphasis, indentation).

mod backspace;
pub mod format;
mod line;
mod newline;
mod text;

pub use format::{FormatAction, FormatResult, INDENT_UNIT, Selection};
pub use line::{LineKind, classify};

use text::char_len;

/// Outcome of [`apply`].
///
/// When `handled` is false, `text` echoes the new buffer and `cursor` is
/// the ordinary post-edit position; the host may keep its own state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub text: String,
    pub cursor: usize,
    pub handled: bool,
}

impl EditResult {
    fn passthrough(old_text: &str, new_text: &str, cursor_before_edit: usize) -> Self {
        let old_len = char_len(old_text);
        let new_len = char_len(new_text);
        let cursor = if new_len >= old_len {
            cursor_before_edit.saturating_add(new_len - old_len)
        } else {
            cursor_before_edit.saturating_sub(old_len - new_len)
        };
        Self {
            text: new_text.to_string(),
            cursor: cursor.min(new_len),
            handled: false,
        }
    }
}

/// The edit shapes the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
    /// A newline was inserted at char offset `at` of the new text.
    InsertNewline { at: usize },
    /// The buffer got shorter.
    Backspace,
    /// Anything else; passes through untouched.
    Other,
}

impl EditEvent {
    /// Work out which edit turned `old_text` into `new_text`.
    pub fn detect(old_text: &str, new_text: &str, cursor_before_edit: usize) -> Self {
        let old_len = char_len(old_text);
        let new_len = char_len(new_text);

        if new_len < old_len {
            return Self::Backspace;
        }

        if new_len == old_len + 1 {
            let at = cursor_before_edit.min(old_len);
            let (before, after) = old_text.split_at(text::byte_index(old_text, at));
            let inserted_newline = new_text
                .strip_prefix(before)
                .and_then(|rest| rest.strip_prefix('\n'))
                .is_some_and(|rest| rest == after);
            if inserted_newline {
                return Self::InsertNewline { at };
            }
        }

        // Hosts that only report whole-buffer snapshots: a buffer that newly
        // ends in a newline was an Enter at the end.
        if new_text.ends_with('\n') && !old_text.ends_with('\n') {
            return Self::InsertNewline { at: new_len - 1 };
        }

        Self::Other
    }
}

/// Apply list-continuation rules to a raw edit.
///
/// `old_text` is the buffer before the edit, `new_text` the buffer the
/// host is about to commit, and `cursor_before_edit` the cursor before
/// the edit, in chars.
pub fn apply(old_text: &str, new_text: &str, cursor_before_edit: usize) -> EditResult {
    let handled = match EditEvent::detect(old_text, new_text, cursor_before_edit) {
        EditEvent::Backspace => backspace::clear_bare_marker(old_text, new_text),
        EditEvent::InsertNewline { at } => newline::continue_list(new_text, at),
        EditEvent::Other => None,
    };
    handled.unwrap_or_else(|| EditResult::passthrough(old_text, new_text, cursor_before_edit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_backspace() {
        assert_eq!(EditEvent::detect("ab", "a", 2), EditEvent::Backspace);
    }

    #[test]
    fn test_detect_newline_at_cursor() {
        assert_eq!(
            EditEvent::detect("- ab", "- a\nb", 3),
            EditEvent::InsertNewline { at: 3 }
        );
    }

    #[test]
    fn test_detect_newline_appended_with_stale_cursor() {
        assert_eq!(
            EditEvent::detect("- a", "- a\n", 0),
            EditEvent::InsertNewline { at: 3 }
        );
    }

    #[test]
    fn test_detect_typed_char_is_other() {
        assert_eq!(EditEvent::detect("- a", "- ab", 3), EditEvent::Other);
    }

    #[test]
    fn test_detect_newline_after_trailing_newline_at_cursor() {
        assert_eq!(
            EditEvent::detect("- a\n", "- a\n\n", 4),
            EditEvent::InsertNewline { at: 4 }
        );
    }

    #[test]
    fn test_detect_multibyte_prefix() {
        assert_eq!(
            EditEvent::detect("- café", "- café\n", 6),
            EditEvent::InsertNewline { at: 6 }
        );
    }

    #[test]
    fn test_enter_after_bullet() {
        let result = apply("- hello", "- hello\n", 7);
        assert!(result.handled);
        assert_eq!(result.text, "- hello\n- ");
        assert_eq!(result.cursor, 10);
    }

    #[test]
    fn test_enter_on_empty_bullet_exits_list() {
        let result = apply("- ", "- \n", 2);
        assert!(result.handled);
        assert_eq!(result.text, "\n");
        assert_eq!(result.cursor, 1);
    }

    #[test]
    fn test_enter_after_numbered() {
        let result = apply("3. item", "3. item\n", 7);
        assert!(result.handled);
        assert_eq!(result.text, "3. item\n4. ");
        assert_eq!(result.cursor, 11);
    }

    #[test]
    fn test_enter_in_middle_of_bullet() {
        let result = apply("- hello world", "- hello\n world", 7);
        assert!(result.handled);
        assert_eq!(result.text, "- hello\n-  world");
        assert_eq!(result.cursor, 10);
    }

    #[test]
    fn test_enter_on_later_empty_item_keeps_earlier_items() {
        let result = apply("- a\n- ", "- a\n- \n", 6);
        assert_eq!(result.text, "- a\n\n");
        assert_eq!(result.cursor, 5);
    }

    #[test]
    fn test_backspace_from_bare_bullet() {
        let result = apply("- ", "-", 2);
        assert!(result.handled);
        assert_eq!(result.text, "");
        assert_eq!(result.cursor, 0);
    }

    #[test]
    fn test_backspace_from_bare_numbered() {
        let result = apply("1. ", "1.", 3);
        assert!(result.handled);
        assert_eq!(result.text, "");
        assert_eq!(result.cursor, 0);
    }

    #[test]
    fn test_unrelated_edit_passes_through() {
        let result = apply("hello", "hello!", 5);
        assert!(!result.handled);
        assert_eq!(result.text, "hello!");
        assert_eq!(result.cursor, 6);
    }

    #[test]
    fn test_plain_enter_passes_through() {
        let result = apply("hello", "hello\n", 5);
        assert!(!result.handled);
        assert_eq!(result.text, "hello\n");
        assert_eq!(result.cursor, 6);
    }

    #[test]
    fn test_plain_backspace_passes_through() {
        let result = apply("- abc", "- ab", 5);
        assert!(!result.handled);
        assert_eq!(result.cursor, 4);
    }

    #[test]
    fn test_numbering_does_not_resume_interrupted_list() {
        let old = "1. a\n2. b\n\nbreak\n1. again";
        let result = apply(old, &format!("{old}\n"), 25);
        assert_eq!(result.text, format!("{old}\n2. "));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn plain_line() -> impl Strategy<Value = String> {
            "[a-z ]{0,12}".prop_filter("not a list item", |s| !classify(s).is_list())
        }

        proptest! {
            #[test]
            fn typing_a_char_is_never_handled(
                text in "[a-z\\- .0-9\n]{0,30}",
                ch in "[a-z]",
                cursor in 0..31usize,
            ) {
                let at = cursor.min(text.chars().count());
                let new_text = text::insert_chars(&text, at, &ch);
                let result = apply(&text, &new_text, at);
                prop_assert!(!result.handled);
                prop_assert_eq!(result.text, new_text);
                prop_assert_eq!(result.cursor, at + 1);
            }

            #[test]
            fn enter_after_plain_line_is_never_handled(
                lines in proptest::collection::vec(plain_line(), 1..6),
            ) {
                let old = lines.join("\n");
                let new_text = format!("{old}\n");
                let cursor = old.chars().count();
                let result = apply(&old, &new_text, cursor);
                prop_assert!(!result.handled);
                prop_assert_eq!(result.text, new_text);
            }

            #[test]
            fn result_cursor_stays_in_bounds(
                old in "[a-z\\-* .0-9\n]{0,30}",
                new_text in "[a-z\\-* .0-9\n]{0,30}",
                cursor in 0..40usize,
            ) {
                let result = apply(&old, &new_text, cursor);
                prop_assert!(result.cursor <= result.text.chars().count());
            }

            #[test]
            fn bullet_item_always_continues(
                indent in "[ \t]{0,4}",
                marker in "[-*]",
                content in "[a-z][a-z ]{0,10}",
            ) {
                let old = format!("{indent}{marker} {content}");
                let new_text = format!("{old}\n");
                let result = apply(&old, &new_text, old.chars().count());
                let expected = format!("{new_text}{indent}{marker} ");
                prop_assert!(result.handled);
                prop_assert_eq!(result.cursor, expected.chars().count());
                prop_assert_eq!(result.text, expected);
            }
        }
    }
}
