//! Notifications emitted to the presentation shell.
//!
//! Every call into the state machine returns the events it caused, in
//! order. The shell renders from them (or from a fresh snapshot) and
//! never needs to diff board state itself.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, GroupId};
use crate::core::{PlayerId, PlayerMap};
use crate::rules::GameResult;
use crate::scheduler::TaskHandle;

/// Something the shell should show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was turned face-up by `player`.
    CardRevealed { card: CardId, player: PlayerId },

    /// A pending pair was judged.
    Round(RoundResult),

    /// A mismatched pair was turned back face-down.
    CardsHidden { first: CardId, second: CardId },

    /// The turn moved to another player after a mismatch.
    TurnPassed { from: PlayerId, to: PlayerId },

    /// The last pair was found.
    GameComplete(GameSummary),

    /// A new board was dealt; anything from an older epoch is void.
    BoardReset { epoch: u64 },
}

impl GameEvent {
    /// The match announcement, if this event carries one.
    #[must_use]
    pub fn as_match(&self) -> Option<&MatchAnnouncement> {
        match self {
            GameEvent::Round(RoundResult::Match(m)) => Some(m),
            _ => None,
        }
    }

    /// The final summary, if this event ends the game.
    #[must_use]
    pub fn as_summary(&self) -> Option<&GameSummary> {
        match self {
            GameEvent::GameComplete(s) => Some(s),
            _ => None,
        }
    }
}

/// Outcome of one pair attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Match(MatchAnnouncement),

    /// The faces stay visible until `flip_back` runs.
    Mismatch {
        first: CardId,
        second: CardId,
        player: PlayerId,
        flip_back: TaskHandle,
    },
}

impl RoundResult {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, RoundResult::Match(_))
    }
}

/// The "you found a derby" dialog.
///
/// Team names are given in selection order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAnnouncement {
    pub player: PlayerId,
    pub group: GroupId,
    pub derby_name: String,
    pub first_team: String,
    pub second_team: String,
    /// The player's score after this match.
    pub score: u32,
    pub is_game_complete: bool,
}

impl std::fmt::Display for MatchAnnouncement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Match! {} vs {}: the {}.",
            self.first_team, self.second_team, self.derby_name
        )?;
        if !self.is_game_complete {
            write!(f, " {} goes again.", self.player)?;
        }
        Ok(())
    }
}

/// Final scores and who won.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub scores: PlayerMap<u32>,
    pub result: GameResult,
}

impl GameSummary {
    #[must_use]
    pub fn from_scores(scores: PlayerMap<u32>) -> Self {
        let result = GameResult::from_scores(&scores);
        Self { scores, result }
    }
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scores: Vec<String> = self
            .scores
            .iter()
            .map(|(player, score)| format!("{player}: {score}"))
            .collect();
        write!(
            f,
            "Complete! Every derby found. {}. {}.",
            scores.join(", "),
            self.result
        )
    }
}
