use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

/// Shortcut hints for the formatting actions.
pub const TOOLBAR_HINTS: &str =
    " ^L \u{2022} list  ^O 1. list  ^T # head  ^B bold  ^E italic  Tab/S-Tab indent  ^D clear";

pub fn render_toolbar(frame: &mut Frame, area: Rect) {
    let toolbar = Paragraph::new(TOOLBAR_HINTS)
        .style(Style::default().bg(Color::Black).fg(Color::Indexed(245)));
    frame.render_widget(toolbar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.note_path.file_name().map_or_else(
        || "untitled".to_string(),
        |s| s.to_string_lossy().to_string(),
    );

    let dirty_indicator = if model.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };

    let presence = if !model.presence_enabled {
        "off"
    } else if model.presence_active {
        "live"
    } else {
        "idle"
    };

    let cursor = model.buffer.cursor();
    let status = format!(
        " {}  {filename}{dirty_indicator}  presence:{presence}  Ln {}, Col {}  F1:help  ^S:save  ^Q:quit",
        model.title,
        cursor.line + 1,
        cursor.col + 1
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
