//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state transitions.
//! It has **zero dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed and actions produce identical games
//! - **Testable**: Every rule is a plain function of `(state, action, rng)`
//! - **Portable**: Runs in the terminal frontend, headless replays and benches alike
//!
//! # Module Structure
//!
//! - [`board`]: flat block collection with gravity, row shift and overflow checks
//! - [`game_state`]: immutable game snapshots and their transitions
//! - [`rng`]: injectable randomness plus a seeded LCG
//! - [`scoring`]: points per cleared block
//! - [`snapshot`]: stable fingerprints for redraw throttling
//! - [`target`]: target-sum generation
//!
//! # Game Rules
//!
//! - The board is 6 columns by 10 rows, row 0 at the bottom; a game starts
//!   with the bottom 4 rows filled with values 1-9.
//! - Selecting blocks accumulates their values. Hitting the target exactly
//!   clears them (10 points each) and the survivors fall to close gaps.
//!   Overshooting the target discards the selection.
//! - **Classic**: every match pushes a new row in from the bottom.
//! - **Time**: a new row is pushed in whenever the 10 second countdown expires.
//! - The game ends when a push would move a block past the top row.
//!
//! # Example
//!
//! ```
//! use sumstack_core::{start_game, SimpleRng};
//! use sumstack_core::types::{GameMode, GameStatus};
//!
//! let mut rng = SimpleRng::new(12345);
//! let game = start_game(GameMode::Classic, &mut rng);
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Transitions return a new snapshot; the old one is untouched.
//! let first = game.blocks()[0].id;
//! let next = game.select_block(first, &mut rng);
//! assert!(game.selected_ids().is_empty());
//! assert!(next.validate().is_ok());
//! ```

pub mod board;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod target;

pub use sumstack_types as types;

// Re-export commonly used types for convenience
pub use board::{random_value, Block, Board, Grid};
pub use game_state::{start_game, GameState};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{match_points, sum_progress_percent};
pub use snapshot::{fingerprint, Fnv1aHasher};
pub use target::generate_target;
