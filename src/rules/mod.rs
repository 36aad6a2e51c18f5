//! Matching rules and game results.
//!
//! The state machine calls into these but never interprets scores or
//! groups itself.

pub mod engine;

pub use engine::{evaluate_pair, GameResult, PairOutcome};
