//! Session host for the game engine.
//!
//! The core crate is a set of pure transitions; something still has to own the
//! live snapshot, hold the RNG, and drive the time-mode countdown from a real
//! clock. That is this crate:
//!
//! - [`session`]: owns the current state and applies events to it
//! - [`countdown`]: the scoped one-second interval that only runs while a
//!   time-mode game is being played
//! - [`config`]: environment configuration shared by the binaries

pub mod config;
pub mod countdown;
pub mod session;

pub use sumstack_core as core;
pub use sumstack_types as types;

pub use config::{ConfigError, GameConfig};
pub use countdown::Countdown;
pub use session::Session;
