//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable from the
//! pure rules engine, the session host, the terminal frontend and the headless
//! replay tool alike.
//!
//! # Board Dimensions
//!
//! - **Rows**: 10 (indexed 0-9, row 0 is the bottom of the board)
//! - **Columns**: 6 (indexed 0-5)
//! - **Initial fill**: the bottom 4 rows
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TIME_MODE_LIMIT` | 10 | Countdown (in ticks) before a row spawns in time mode |
//! | `TICK_INTERVAL_MS` | 1000 | Length of one countdown tick |
//! | `FRAME_MS` | 33 | Frontend frame interval |
//!
//! # Examples
//!
//! ```
//! use sumstack_types::{GameAction, GameMode, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(GameMode::from_str("TIME"), Some(GameMode::Time));
//! assert_eq!(GameMode::Classic.as_str(), "classic");
//!
//! let action = GameAction::StartGame { mode: GameMode::Classic };
//! assert_eq!(action.as_str(), "startGame");
//!
//! assert_eq!(GRID_ROWS, 10);
//! assert_eq!(GRID_COLS, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Board height in rows
pub const GRID_ROWS: u8 = 10;

/// Board width in columns
pub const GRID_COLS: u8 = 6;

/// Rows filled when a game starts
pub const INITIAL_ROWS: u8 = 4;

/// Largest value a block can carry (smallest is 1)
pub const MAX_BLOCK_VALUE: u8 = 9;

/// Maximum number of blocks that fit on the board while playing
pub const MAX_BLOCKS: usize = GRID_ROWS as usize * GRID_COLS as usize;

/// Time mode countdown, in ticks, before a new row is pushed in
pub const TIME_MODE_LIMIT: u32 = 10;

/// Countdown tick interval (1 second)
pub const TICK_INTERVAL_MS: u32 = 1000;

/// Frontend frame interval (~30 FPS)
pub const FRAME_MS: u32 = 33;

/// Points awarded per cleared block
pub const POINTS_PER_BLOCK: u32 = 10;

/// Target returned when there are no blocks to draw from
pub const FALLBACK_TARGET: u32 = 10;

/// Lower clamp for generated targets
pub const TARGET_MIN: u32 = 5;

/// Upper clamp for generated targets
pub const TARGET_MAX: u32 = 30;

/// Smallest number of blocks a target is built from
pub const TARGET_PICK_MIN: u32 = 2;

/// Largest number of blocks a target is built from
pub const TARGET_PICK_MAX: u32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_and_timing_defaults() {
        assert_eq!(GRID_ROWS, 10);
        assert_eq!(GRID_COLS, 6);
        assert_eq!(INITIAL_ROWS, 4);
        assert_eq!(MAX_BLOCK_VALUE, 9);
        assert_eq!(MAX_BLOCKS, 60);
        assert_eq!(TIME_MODE_LIMIT, 10);
        assert_eq!(TICK_INTERVAL_MS, 1000);
    }

    #[test]
    fn target_bounds_are_ordered() {
        assert!(TARGET_MIN <= FALLBACK_TARGET && FALLBACK_TARGET <= TARGET_MAX);
        assert!(TARGET_PICK_MIN <= TARGET_PICK_MAX);
    }

    #[test]
    fn game_action_round_trips_through_str() {
        assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
        assert_eq!(GameAction::from_str("returnToMenu"), Some(GameAction::ReturnToMenu));
        assert_eq!(GameAction::from_str("TICK"), Some(GameAction::Tick));
        assert_eq!(GameAction::from_str("selectBlock"), None);
    }

    #[test]
    fn status_playing_helper() {
        assert!(GameStatus::Playing.is_playing());
        assert!(!GameStatus::Menu.is_playing());
        assert!(!GameStatus::GameOver.is_playing());
    }
}

/// Unique identifier of a block.
///
/// Ids are allocated from a monotonic counter and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u32);

impl BlockId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Game modes
///
/// - **Classic**: every successful match pushes a new row in
/// - **Time**: a new row is pushed in whenever the countdown runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Time,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use sumstack_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("classic"), Some(GameMode::Classic));
    /// assert_eq!(GameMode::from_str("Time"), Some(GameMode::Time));
    /// assert_eq!(GameMode::from_str("arcade"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "time" => Some(GameMode::Time),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Time => "time",
        }
    }

    /// Human readable label for menus and the HUD
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "CLASSIC",
            GameMode::Time => "TIME",
        }
    }
}

/// Top-level screen the game is on
///
/// The cycle goes: Menu → Playing → GameOver → (Playing | Menu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    GameOver,
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Menu => "menu",
            GameStatus::Playing => "playing",
            GameStatus::GameOver => "gameover",
        }
    }
}

/// Events that can be applied to a game state
///
/// These are produced by the terminal frontend, the session countdown and the
/// replay tool. Serialized as internally tagged JSON, e.g.
/// `{"type":"selectBlock","id":3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameAction {
    /// Start a fresh game in the given mode
    StartGame { mode: GameMode },
    /// Start a fresh game in the current mode
    Restart,
    /// Toggle selection of a block
    SelectBlock { id: BlockId },
    /// Leave the current game for the menu
    ReturnToMenu,
    /// One countdown step (time mode only)
    Tick,
}

impl GameAction {
    /// Parse a payload-free action from string
    ///
    /// Actions carrying data (`startGame`, `selectBlock`) have no plain string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart" => Some(GameAction::Restart),
            "returntomenu" | "menu" => Some(GameAction::ReturnToMenu),
            "tick" => Some(GameAction::Tick),
            _ => None,
        }
    }

    /// camelCase name, matching the serialized `type` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::StartGame { .. } => "startGame",
            GameAction::Restart => "restart",
            GameAction::SelectBlock { .. } => "selectBlock",
            GameAction::ReturnToMenu => "returnToMenu",
            GameAction::Tick => "tick",
        }
    }
}

/// What the most recent transition did.
///
/// Recorded on the produced state so hosts can log and frontends can flash
/// feedback without diffing snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LastEvent {
    Started { mode: GameMode },
    Selected { id: BlockId },
    Deselected { id: BlockId },
    /// Selection overshot the target and was discarded
    Bust { sum: u32 },
    /// Selection hit the target
    Matched { removed: u32, points: u32 },
    /// Countdown advanced by one
    TimerTick { time_left: u32 },
    /// A new bottom row was pushed in
    RowSpawned,
    GameOver,
    ReturnedToMenu,
}
