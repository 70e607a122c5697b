use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::EditorBuffer;
use crate::presence::DEFAULT_TITLE;

/// Rows below the editor: toolbar hints and the status bar.
pub const FOOTER_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. Collaborators
/// that do I/O (storage, presence) live on [`crate::app::App`].
#[derive(Debug)]
pub struct Model {
    /// Path of the note file
    pub note_path: PathBuf,
    /// Title handed to the presence backend
    pub title: String,
    /// The live note
    pub buffer: EditorBuffer,
    /// Line index of the first visible editor line
    pub scroll_offset: usize,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Set after the first clear request; a second one clears the note
    pub clear_pending: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether presence is enabled at all
    pub presence_enabled: bool,
    /// Whether a presence activity is currently running
    pub presence_active: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
}

impl Model {
    /// Create a model for a loaded note.
    pub fn new(note_path: PathBuf, content: &str, terminal_size: (u16, u16)) -> Self {
        let mut buffer = EditorBuffer::from_text(content);
        buffer.move_to_end();
        let mut model = Self {
            note_path,
            title: DEFAULT_TITLE.to_string(),
            buffer,
            scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            help_visible: false,
            clear_pending: false,
            should_quit: false,
            presence_enabled: true,
            presence_active: false,
            config_global_path: None,
            config_local_path: None,
            toast: None,
        };
        model.ensure_cursor_visible();
        model
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Rows available for note text.
    pub const fn editor_height(&self) -> u16 {
        self.height.saturating_sub(FOOTER_ROWS)
    }

    /// Keep the cursor line inside the visible editor rows.
    pub fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.buffer.cursor().line;
        let visible_height = usize::from(self.editor_height());
        if visible_height == 0 {
            self.scroll_offset = cursor_line;
            return;
        }

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + visible_height {
            self.scroll_offset = cursor_line + 1 - visible_height;
        }
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), "", (80, 24))
    }
}
