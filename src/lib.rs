// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. presence::PresenceError)
    clippy::module_name_repetitions
)]

//! # BrainCache
//!
//! A quick-memo terminal note editor.
//!
//! BrainCache keeps a single markdown note and:
//! - Continues bullet and numbered lists as you type
//! - Offers toolbar-style formatting (lists, headings, emphasis, indent)
//! - Saves on every change
//! - Mirrors the note to a presence record outside the editor
//!
//! ## Architecture
//!
//! BrainCache uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`continuation`]: List continuation engine and formatting actions
//! - [`editor`]: Rope-backed note buffer
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`presence`]: Presence activity state machine and backends
//! - [`storage`]: Note persistence
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod continuation;
pub mod editor;
pub mod perf;
pub mod presence;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::continuation::{EditResult, FormatAction, Selection, apply};
    pub use crate::editor::EditorBuffer;
}
