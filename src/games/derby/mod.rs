//! Derby memory: the concentration game itself.
//!
//! Players take turns revealing two cards. A pair from the same derby
//! stays face-up, scores a point and the player goes again; a mismatch
//! stays visible for the configured delay, turns back over and passes
//! the turn. The game ends when every derby has been found.

mod game;

pub use game::{DerbyMemory, DerbyMemoryBuilder};
