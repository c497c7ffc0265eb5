//! Environment configuration.
//!
//! - `SUMSTACK_SEED`: RNG seed (u32). Defaults to a clock-derived seed.
//! - `SUMSTACK_MODE`: `classic` | `time`. When set, the game starts directly in that mode.
//! - `SUMSTACK_LOG_PATH`: file to write logs to. Logging is off without it.
//! - `SUMSTACK_LOG`: log filter (default `info`).

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::GameMode;

pub const SEED_VAR: &str = "SUMSTACK_SEED";
pub const MODE_VAR: &str = "SUMSTACK_MODE";
pub const LOG_PATH_VAR: &str = "SUMSTACK_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "SUMSTACK_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: expected an unsigned 32-bit integer")]
    InvalidSeed { var: &'static str, value: String },
    #[error("invalid {var} value {value:?}: expected `classic` or `time`")]
    InvalidMode { var: &'static str, value: String },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u32>,
    pub start_mode: Option<GameMode>,
    pub log_path: Option<String>,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_mode: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (environment, tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match non_empty(SEED_VAR) {
            Some(v) => Some(v.parse::<u32>().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_VAR,
                value: v.clone(),
            })?),
            None => None,
        };

        let start_mode = match non_empty(MODE_VAR) {
            Some(v) => Some(GameMode::from_str(&v).ok_or(ConfigError::InvalidMode {
                var: MODE_VAR,
                value: v.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            seed,
            start_mode,
            log_path: non_empty(LOG_PATH_VAR),
            log_filter: non_empty(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Configured seed, or one derived from the system clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
