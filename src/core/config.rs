//! Session configuration.
//!
//! Shells configure a game at startup via `GameConfig`:
//! - how many players share the board
//! - how long a mismatched pair stays face-up
//! - the shuffle seed (or OS entropy)
//!
//! The derby catalog is configured separately (see `cards::DerbyCatalog`).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::MAX_PLAYERS;

/// Default time a mismatched pair stays visible before flipping back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count must be between 1 and 8, got {0}")]
    PlayerCount(usize),
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players taking turns (1 = solo).
    pub player_count: usize,

    /// How long both faces of a mismatch stay visible.
    pub mismatch_delay: Duration,

    /// Shuffle seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the default two-player configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the mismatch reveal delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Fix the shuffle seed for reproducible boards.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration before a session is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        Ok(())
    }
}
