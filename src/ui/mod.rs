//! Terminal UI components.
//!
//! The screen is the note editor with a line-number gutter, a toolbar
//! row (formatting hints, or a toast when one is active) and a status bar.

mod overlays;
mod render;
mod status;

pub use render::{horizontal_offset, line_number_width, render};
pub use status::TOOLBAR_HINTS;
