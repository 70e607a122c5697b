use crate::app::{Model, ToastLevel};
use crate::continuation::FormatAction;
use crate::editor::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Split line at cursor (Enter)
    InsertNewline,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Run a toolbar formatting action
    Format(FormatAction),

    // Cursor
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor in a direction, extending the selection
    ExtendSelection(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,

    // Note
    /// Clear the note; needs to be sent twice
    ClearNote,
    /// Save the note now
    Save,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Saving and presence are side effects, handled after this returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the clear confirmation on any other action.
    let clear_requested = matches!(msg, Message::ClearNote);
    if !clear_requested {
        model.clear_pending = false;
    }

    match msg {
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
        }
        Message::InsertText(text) => {
            model.buffer.insert_str(&text);
        }
        Message::InsertNewline => {
            model.buffer.split_line();
        }
        Message::DeleteBack => {
            model.buffer.delete_back();
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
        }
        Message::Format(action) => {
            model.buffer.apply_format(action);
        }
        Message::MoveCursor(dir) => {
            model.buffer.move_cursor(dir);
        }
        Message::ExtendSelection(dir) => {
            model.buffer.extend_selection(dir);
        }
        Message::MoveHome => {
            model.buffer.move_home();
        }
        Message::MoveEnd => {
            model.buffer.move_end();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
        }
        Message::ClearNote => {
            if model.clear_pending {
                model.buffer.clear();
                model.clear_pending = false;
                model.show_toast(ToastLevel::Info, "Note cleared");
            } else {
                model.clear_pending = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Clear the note? Press Ctrl+D again to confirm",
                );
            }
        }
        // Save: handled in effects
        Message::Save => {}
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model.ensure_cursor_visible();
    model
}
