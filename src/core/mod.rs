//! Core session types: players, turn state, actions, RNG, configuration.
//!
//! These are the building blocks the game state machine is assembled
//! from. None of them know about derbies or boards.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::GameRng;
pub use config::{ConfigError, GameConfig, DEFAULT_MISMATCH_DELAY};
pub use action::{Action, ActionRecord};
pub use state::{Selection, TurnState};
