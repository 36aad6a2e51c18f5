//! Pair evaluation and final results.
//!
//! The state machine asks two questions of the rules once a pair is
//! pending: do the cards belong together, and is this the last pair on
//! the board? Both are answered against the board *before* the pair is
//! resolved. When the board is cleared, `GameResult::from_scores`
//! decides who won.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::CardId;
use crate::core::{PlayerId, PlayerMap};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw: every player finished level.
    Draw,
    /// Several players share the top score while others trail.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Decide the result from final scores.
    ///
    /// ```
    /// use derby_memory::core::{PlayerId, PlayerMap};
    /// use derby_memory::rules::GameResult;
    ///
    /// let scores = PlayerMap::new(2, |p| if p == PlayerId::new(1) { 5 } else { 3 });
    /// assert_eq!(GameResult::from_scores(&scores), GameResult::Winner(PlayerId::new(1)));
    ///
    /// let level: PlayerMap<u32> = PlayerMap::with_value(2, 4);
    /// assert_eq!(GameResult::from_scores(&level), GameResult::Draw);
    /// ```
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<u32>) -> Self {
        let best = scores.iter().map(|(_, &s)| s).max().unwrap_or(0);
        let leaders: Vec<PlayerId> = scores
            .iter()
            .filter(|(_, s)| **s == best)
            .map(|(p, _)| p)
            .collect();

        match leaders.as_slice() {
            [only] => GameResult::Winner(*only),
            _ if leaders.len() == scores.player_count() => GameResult::Draw,
            _ => GameResult::Winners(leaders),
        }
    }

    /// Check if a player won (alone or shared).
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p} wins"),
            GameResult::Draw => write!(f, "It's a tie"),
            GameResult::Winners(ps) => {
                let names: Vec<String> = ps.iter().map(ToString::to_string).collect();
                write!(f, "{} share the win", names.join(" and "))
            }
        }
    }
}

/// Verdict on a pending pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairOutcome {
    /// Both cards belong to the same derby.
    pub is_match: bool,
    /// The pair is the last two unmatched cards on the board.
    pub is_game_complete: bool,
}

/// Judge a pending pair against the unresolved board.
///
/// Completion is measured on the board as it stands, before the pair is
/// marked: the pair is the last one iff exactly two unmatched cards remain.
///
/// # Panics
///
/// Panics if either card is not on the board.
#[must_use]
pub fn evaluate_pair(board: &Board, first: CardId, second: CardId) -> PairOutcome {
    let (a, b) = match (board.get(first), board.get(second)) {
        (Some(a), Some(b)) => (a, b),
        _ => panic!("pending pair {first}/{second} is not on the board"),
    };

    let is_match = a.group == b.group;
    let is_game_complete = board.unmatched_count() == 2;

    PairOutcome {
        is_match,
        is_game_complete,
    }
}
