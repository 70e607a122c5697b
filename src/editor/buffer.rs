use std::ops::Range;

use ropey::Rope;

use crate::continuation::{self, FormatAction, Selection};

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in chars.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The live note buffer.
///
/// Owns the text, the cursor and an optional selection anchor. Every text
/// change goes through [`continuation::apply`] before it is committed, so
/// list markers are continued and cleaned up as the user types.
pub struct EditorBuffer {
    rope: Rope,
    /// Cursor as a char offset into the rope.
    cursor: usize,
    /// Other end of the selection, when one is active.
    anchor: Option<usize>,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
    dirty: bool,
    revision: u64,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            anchor: None,
            col_memory: 0,
            dirty: false,
            revision: 0,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.cursor);
        Cursor::at(line, self.cursor - self.rope.line_to_char(line))
    }

    /// The cursor as a char offset.
    pub const fn cursor_offset(&self) -> usize {
        self.cursor
    }

    /// The active selection, or a caret at the cursor.
    pub fn selection(&self) -> Selection {
        self.anchor
            .map_or(Selection::caret(self.cursor), |anchor| {
                Selection::new(anchor, self.cursor)
            })
    }

    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Counter bumped on every committed text change.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Char offset of the first char of a line.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert a character at the cursor, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0; 4];
        self.insert_str(ch.encode_utf8(&mut utf8));
    }

    /// Insert a string at the cursor, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        let selection = self.selection();
        if s.is_empty() && selection.is_empty() {
            return;
        }
        let inserted = s.chars().count();
        self.edit(
            selection.start..selection.end,
            s,
            selection.start,
            selection.start + inserted,
        );
    }

    /// Split the current line at the cursor (Enter).
    ///
    /// A selection is dropped first so the newline reaches list
    /// continuation as a plain insertion at the caret.
    pub fn split_line(&mut self) {
        let selection = self.selection();
        if !selection.is_empty() {
            self.rope.remove(selection.start..selection.end);
            self.anchor = None;
            self.set_cursor(selection.start);
        }
        let at = self.cursor;
        self.edit(at..at, "\n", at, at + 1);
    }

    /// Delete the selection or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        let selection = self.selection();
        if !selection.is_empty() {
            self.edit(selection.start..selection.end, "", selection.end, selection.start);
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let at = self.cursor;
        self.edit(at - 1..at, "", at, at - 1);
        true
    }

    /// Delete the selection or the character at the cursor (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let selection = self.selection();
        if !selection.is_empty() {
            self.edit(selection.start..selection.end, "", selection.end, selection.start);
            return true;
        }
        let at = self.cursor;
        if at >= self.rope.len_chars() {
            return false;
        }
        self.edit(at..at + 1, "", at + 1, at);
        true
    }

    /// Run a toolbar formatting action against this buffer.
    ///
    /// Returns `true` if the text changed.
    pub fn apply_format(&mut self, action: FormatAction) -> bool {
        let text = self.text();
        let result = action.apply(&text, self.selection());
        let changed = result.text != text;
        if changed {
            self.rope = Rope::from_str(&result.text);
            self.commit();
        }
        self.set_selection(result.selection);
        crate::perf::log_event(
            "format.apply",
            format!(
                "action={} changed={changed} selection={}..{}",
                action.label(),
                result.selection.start,
                result.selection.end
            ),
        );
        changed
    }

    /// Replace the whole text with nothing.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.rope = Rope::new();
        self.anchor = None;
        self.set_cursor(0);
        self.commit();
    }

    /// Move the cursor in the given direction, dropping any selection.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.anchor = None;
        self.step(direction);
    }

    /// Move the cursor in the given direction, growing the selection.
    pub fn extend_selection(&mut self, direction: Direction) {
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
        self.step(direction);
        if self.anchor == Some(self.cursor) {
            self.anchor = None;
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        self.anchor = None;
        let line = self.cursor().line;
        self.set_cursor(self.line_start(line));
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.anchor = None;
        let line = self.cursor().line;
        self.set_cursor(self.line_start(line) + self.line_len(line));
    }

    /// Move cursor to a specific line and column.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.anchor = None;
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.set_cursor(self.line_start(line) + col);
    }

    /// Move the cursor to a char offset, clamped to the buffer.
    pub fn move_to_offset(&mut self, offset: usize) {
        self.anchor = None;
        self.set_cursor(offset.min(self.rope.len_chars()));
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self) {
        self.anchor = None;
        self.set_cursor(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.anchor = None;
        self.set_cursor(self.rope.len_chars());
    }

    // --- Private helpers ---

    /// Replace `range` with `insert`, then let the continuation engine
    /// correct the result.
    ///
    /// `cursor_before` is what the engine sees as the pre-edit cursor;
    /// `cursor_after` is where the cursor goes when the engine passes.
    fn edit(&mut self, range: Range<usize>, insert: &str, cursor_before: usize, cursor_after: usize) {
        let old_text = self.text();
        self.rope.remove(range.clone());
        self.rope.insert(range.start, insert);
        let new_text = self.text();

        let result = continuation::apply(&old_text, &new_text, cursor_before);
        self.anchor = None;
        if result.handled {
            crate::perf::log_event(
                "continuation.handled",
                format!(
                    "old_len={} new_len={} cursor={}",
                    old_text.len(),
                    result.text.len(),
                    result.cursor
                ),
            );
            self.rope = Rope::from_str(&result.text);
            self.set_cursor(result.cursor);
        } else {
            self.set_cursor(cursor_after);
        }
        self.commit();
    }

    fn commit(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.rope.len_chars());
        self.col_memory = self.cursor().col;
    }

    fn set_selection(&mut self, selection: Selection) {
        if selection.is_empty() {
            self.anchor = None;
            self.set_cursor(selection.start);
        } else {
            self.set_cursor(selection.end);
            self.anchor = Some(selection.start.min(self.rope.len_chars()));
        }
    }

    fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.set_cursor(self.cursor.saturating_sub(1)),
            Direction::Right => self.set_cursor(self.cursor + 1),
            Direction::Up => {
                let line = self.cursor().line;
                if line > 0 {
                    self.move_vertically(line - 1);
                }
            }
            Direction::Down => {
                let line = self.cursor().line;
                if line + 1 < self.line_count() {
                    self.move_vertically(line + 1);
                }
            }
        }
    }

    fn move_vertically(&mut self, line: usize) {
        let col = self.col_memory.min(self.line_len(line));
        self.cursor = self.line_start(line) + col;
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("dirty", &self.dirty)
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}
