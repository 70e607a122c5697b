//! Presence: mirrors the current note outside the editor.
//!
//! A [`PresenceService`] backend shows one activity at a time; the
//! [`PresenceManager`] drives it from committed note content. Empty
//! content ends the activity, anything else starts or updates it.
//!
//! Backend failures never reach the editor. The manager logs them via
//! `tracing` and carries on.

mod file;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::{DisabledPresence, FilePresence};

/// Title shown when none is configured.
pub const DEFAULT_TITLE: &str = "BrainCache";

/// Static attributes of an activity, fixed when it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceAttributes {
    pub title: String,
}

/// Dynamic state of an activity, replaced on every update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentState {
    pub memo_content: String,
}

impl ContentState {
    pub fn new(memo_content: impl Into<String>) -> Self {
        Self {
            memo_content: memo_content.into(),
        }
    }
}

/// Identifier handed out by a backend when an activity starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub String);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum PresenceError {
    #[error("Presence activities are disabled")]
    Disabled,

    #[error("Presence activity {0} is not running")]
    NotRunning(ActivityId),

    #[error("Presence I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Presence record error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A backend that can show one activity.
pub trait PresenceService: fmt::Debug {
    /// Whether activities may be started at all.
    fn activities_enabled(&self) -> bool;

    /// An activity left running by a previous session, if any.
    fn running(&self) -> Option<ActivityId>;

    fn request(
        &mut self,
        attributes: &PresenceAttributes,
        state: &ContentState,
    ) -> Result<ActivityId, PresenceError>;

    fn update(&mut self, id: &ActivityId, state: &ContentState) -> Result<(), PresenceError>;

    fn end(&mut self, id: &ActivityId) -> Result<(), PresenceError>;
}

/// Start/update/end state machine over a [`PresenceService`].
#[derive(Debug)]
pub struct PresenceManager {
    service: Box<dyn PresenceService>,
    activity: Option<ActivityId>,
}

impl PresenceManager {
    /// Wrap a backend, adopting an activity it already has running.
    pub fn new(service: Box<dyn PresenceService>) -> Self {
        let activity = service.running();
        if let Some(id) = &activity {
            tracing::info!(%id, "adopted running presence activity");
        }
        Self { service, activity }
    }

    pub fn disabled() -> Self {
        Self::new(Box::new(DisabledPresence))
    }

    pub const fn is_running(&self) -> bool {
        self.activity.is_some()
    }

    pub const fn activity(&self) -> Option<&ActivityId> {
        self.activity.as_ref()
    }

    /// Bring the activity in line with `content`.
    pub fn auto_manage(&mut self, content: &str, title: &str) {
        if content.is_empty() {
            if self.is_running() {
                self.end();
            }
        } else if self.is_running() {
            self.update(content);
        } else {
            self.start(title, content);
        }
    }

    pub fn start(&mut self, title: &str, content: &str) {
        if !self.service.activities_enabled() {
            tracing::info!("presence activities are not enabled");
            return;
        }
        let attributes = PresenceAttributes {
            title: title.to_string(),
        };
        match self.service.request(&attributes, &ContentState::new(content)) {
            Ok(id) => {
                tracing::info!(%id, "presence activity started");
                crate::perf::log_event("presence.start", format!("id={id}"));
                self.activity = Some(id);
            }
            Err(err) => tracing::warn!(error = %err, "failed to start presence activity"),
        }
    }

    pub fn update(&mut self, content: &str) {
        let Some(id) = self.activity.clone() else {
            return;
        };
        match self.service.update(&id, &ContentState::new(content)) {
            Ok(()) => crate::perf::log_event("presence.update", format!("id={id}")),
            Err(PresenceError::NotRunning(id)) => {
                // Dismissed outside the editor; the next change starts a new one.
                tracing::info!(%id, "presence activity is gone");
                self.activity = None;
            }
            Err(err) => tracing::warn!(error = %err, %id, "failed to update presence activity"),
        }
    }

    pub fn end(&mut self) {
        let Some(id) = self.activity.take() else {
            return;
        };
        match self.service.end(&id) {
            Ok(()) => {
                tracing::info!(%id, "presence activity ended");
                crate::perf::log_event("presence.end", format!("id={id}"));
            }
            Err(err) => tracing::warn!(error = %err, %id, "failed to end presence activity"),
        }
    }
}
