use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{FOOTER_ROWS, Model};
use crate::continuation::{INDENT_UNIT, Selection};

use super::{overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let area = frame.area();

    let editor_area = Rect {
        height: area.height.saturating_sub(FOOTER_ROWS),
        ..area
    };
    let toolbar_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: area.height.min(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    render_editor(model, frame, editor_area);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, toolbar_area);
    } else {
        status::render_toolbar(frame, toolbar_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = usize::from(area.width.saturating_sub(gutter_width + 1));

    let cursor = buf.cursor();
    let selection = buf.selection();
    let h_offset = horizontal_offset(
        &buf.line_at(cursor.line).unwrap_or_default(),
        cursor.col,
        text_width,
    );

    let start = model.scroll_offset;
    let end = (start + usize::from(area.height)).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];
        let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
        spans.extend(line_spans(
            &line_text,
            buf.line_start(line_idx),
            selection,
            cursor_col,
            h_offset,
        ));
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

fn cursor_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

fn selection_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

/// How a char is drawn: tabs expand to the indent unit.
fn display_cell(ch: char) -> (String, usize) {
    if ch == '\t' {
        (INDENT_UNIT.to_string(), INDENT_UNIT.len())
    } else {
        (ch.to_string(), ch.width().unwrap_or(0))
    }
}

/// Columns to skip so the cursor stays inside `text_width`.
pub fn horizontal_offset(line: &str, cursor_col: usize, text_width: usize) -> usize {
    let cursor_x: usize = line
        .chars()
        .take(cursor_col)
        .map(|ch| display_cell(ch).1)
        .sum();
    if text_width == 0 || cursor_x < text_width {
        0
    } else {
        cursor_x + 1 - text_width
    }
}

/// Styled spans for one line. `line_start` is the char offset of the line
/// in the buffer; `cursor_col` is set on the cursor line.
fn line_spans(
    line: &str,
    line_start: usize,
    selection: Selection,
    cursor_col: Option<usize>,
    h_offset: usize,
) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut x = 0;

    for (col, ch) in line.chars().enumerate() {
        let (text, width) = display_cell(ch);
        let cell_x = x;
        x += width;
        if cell_x < h_offset {
            continue;
        }
        let offset = line_start + col;
        let style = if cursor_col == Some(col) {
            cursor_style()
        } else if offset >= selection.start && offset < selection.end {
            selection_style()
        } else {
            Style::default()
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push_str(&text);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    let line_len = line.chars().count();
    if cursor_col.is_some_and(|col| col >= line_len) {
        spans.push(Span::styled(" ", cursor_style()));
    }
    spans
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
