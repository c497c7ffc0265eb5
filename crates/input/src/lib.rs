//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of the game rules. It maps
//! `crossterm` key and mouse events into [`InputCommand`]s for the current
//! screen and tracks the board cursor used for keyboard play.

pub mod cursor;
pub mod map;

pub use sumstack_types as types;

pub use cursor::Cursor;
pub use map::{map_key, map_mouse, should_quit, InputCommand};
