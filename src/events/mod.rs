//! Game events consumed by the presentation shell.

mod event;

pub use event::{GameEvent, GameSummary, MatchAnnouncement, RoundResult};
