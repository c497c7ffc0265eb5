//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for the puzzle. It avoids
//! widget/layout frameworks and renders into a simple framebuffer that can be
//! flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Make the view a pure function of `(state, cursor, viewport)`
//! - Allow precise control over cell aspect ratio (4x2 characters per block)

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use sumstack_core as core;
pub use sumstack_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
