//! Note buffer for in-place markdown editing.
//!
//! Provides a rope-backed text buffer with cursor and selection
//! management. Edits are passed through the list-continuation engine
//! before they are committed.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
