use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};
use crate::continuation::FormatAction;
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Paste(text) if !model.help_visible => {
                // Terminals send CRLF for pasted line breaks.
                Some(Message::InsertText(text.replace("\r\n", "\n").replace('\r', "\n")))
            }
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if ctrl {
            return match key.code {
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('d') => Some(Message::ClearNote),
                KeyCode::Char('b') => Some(Message::Format(FormatAction::Bold)),
                KeyCode::Char('e') => Some(Message::Format(FormatAction::Italic)),
                KeyCode::Char('l') => Some(Message::Format(FormatAction::Bullet)),
                KeyCode::Char('o') => Some(Message::Format(FormatAction::NumberedList)),
                KeyCode::Char('t') => Some(Message::Format(FormatAction::Heading)),
                KeyCode::Char(']') => Some(Message::Format(FormatAction::IncreaseIndent)),
                KeyCode::Char('[') => Some(Message::Format(FormatAction::DecreaseIndent)),
                KeyCode::Home => Some(Message::MoveToStart),
                KeyCode::End => Some(Message::MoveToEnd),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Tab => Some(Message::Format(FormatAction::IncreaseIndent)),
            KeyCode::BackTab => Some(Message::Format(FormatAction::DecreaseIndent)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::Up => Some(arrow(Direction::Up, shift)),
            KeyCode::Down => Some(arrow(Direction::Down, shift)),
            KeyCode::Left => Some(arrow(Direction::Left, shift)),
            KeyCode::Right => Some(arrow(Direction::Right, shift)),
            KeyCode::Char(c) if !alt => Some(Message::InsertChar(c)),
            _ => None,
        }
    }
}

const fn arrow(direction: Direction, shift: bool) -> Message {
    if shift {
        Message::ExtendSelection(direction)
    } else {
        Message::MoveCursor(direction)
    }
}
