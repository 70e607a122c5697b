//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{FOOTER_ROWS, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::presence::{DEFAULT_TITLE, PresenceManager};
use crate::storage::NoteStorage;

/// Main application struct that owns the collaborators and runs the event loop.
#[derive(Debug)]
pub struct App {
    storage: NoteStorage,
    presence: PresenceManager,
    presence_enabled: bool,
    title: String,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for the given note file.
    pub fn new(note_path: PathBuf) -> Self {
        Self {
            storage: NoteStorage::new(note_path),
            presence: PresenceManager::disabled(),
            presence_enabled: false,
            title: DEFAULT_TITLE.to_string(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the presence title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Drive presence through the given manager.
    #[must_use]
    pub fn with_presence(mut self, presence: PresenceManager) -> Self {
        self.presence = presence;
        self.presence_enabled = true;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the starting model from the note on disk.
    fn initial_model(&self, terminal_size: (u16, u16)) -> Result<Model> {
        let content = self.storage.load().with_context(|| {
            format!("Failed to load note {}", self.storage.path().display())
        })?;
        let mut model = Model::new(self.storage.path().to_path_buf(), &content, terminal_size)
            .with_title(self.title.clone());
        model.presence_enabled = self.presence_enabled;
        model.presence_active = self.presence.is_running();
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        Ok(model)
    }
}
