//! # derby-memory
//!
//! A memory-matching ("concentration") card game engine themed around
//! English football derbies.
//!
//! ## Design Principles
//!
//! 1. **One owned session**: All mutable state (board, turn, pending pair,
//!    input lock) lives in `DerbyMemory`, mutated only through
//!    `select_card` and `reset_game`.
//!
//! 2. **Events out, taps in**: The presentation shell forwards taps and
//!    renders the `GameEvent`s each call returns. Rendering, dialogs and
//!    navigation are not part of this crate.
//!
//! 3. **No timers**: The mismatch pause is a deferred task on a logical
//!    clock, guarded by an epoch so a reset can never be undone by a
//!    late flip-back.
//!
//! ## Modules
//!
//! - `core`: Players, turn state, selection, actions, RNG, configuration
//! - `cards`: Derby records, the catalog, card instances
//! - `board`: Board state and the shuffling generator
//! - `rules`: Pair evaluation and game results
//! - `events`: Notifications for the shell
//! - `scheduler`: Epoch-guarded deferred tasks
//! - `games`: The derby memory state machine
//! - `selfplay`: Headless bots for end-to-end runs

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod events;
pub mod scheduler;
pub mod games;
pub mod selfplay;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GameConfig, GameRng,
    PlayerId, PlayerMap, Selection, TurnState,
};

pub use crate::cards::{
    Card, CardFace, CardId, CardView, CatalogError,
    DerbyCatalog, DerbyRecord, GroupId, InfoPage, TeamInfo,
};

pub use crate::board::{build_board, Board};

pub use crate::rules::{evaluate_pair, GameResult, PairOutcome};

pub use crate::events::{GameEvent, GameSummary, MatchAnnouncement, RoundResult};

pub use crate::scheduler::{DeferredQueue, TaskHandle};

pub use crate::games::derby::{DerbyMemory, DerbyMemoryBuilder};

pub use crate::error::{Error, Result};
