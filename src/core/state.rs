//! Turn and selection state.
//!
//! ## TurnState
//!
//! Observable by the score panel:
//! - Active player
//! - Per-player scores (pairs found)
//! - Turn number (pair attempts so far, starting at 1)
//!
//! ## Selection
//!
//! The pending pair: up to two face-up cards chosen this turn and not
//! yet resolved.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{PlayerId, PlayerMap};
use crate::cards::CardId;

/// Whose turn it is and how everyone is doing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    player_count: usize,

    /// Player currently selecting cards.
    pub active_player: PlayerId,

    /// Pairs found per player.
    pub scores: PlayerMap<u32>,

    /// Pair attempt counter (starts at 1).
    pub turn_number: u32,
}

impl TurnState {
    /// Fresh state: player 1 to move, all scores zero.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            active_player: PlayerId::FIRST,
            scores: PlayerMap::with_default(player_count),
            turn_number: 1,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    /// Credit the active player with a found pair.
    ///
    /// Returns the new score. The active player keeps the turn.
    pub fn award_point(&mut self) -> u32 {
        let score = &mut self.scores[self.active_player];
        *score += 1;
        *score
    }

    /// Hand the turn to the next seat.
    ///
    /// Returns the new active player. With one player this is a no-op.
    pub fn pass_turn(&mut self) -> PlayerId {
        self.active_player = self.active_player.next(self.player_count);
        self.active_player
    }

    /// Count one resolved pair attempt.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
    }

    /// Back to the fresh state.
    pub fn reset(&mut self) {
        *self = Self::new(self.player_count);
    }
}

/// The pending pair buffer.
///
/// Holds at most two cards; a third push is a state machine bug.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    cards: SmallVec<[CardId; 2]>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card, returning the new length.
    pub fn push(&mut self, card: CardId) -> usize {
        assert!(self.cards.len() < 2, "selection already holds a pair");
        self.cards.push(card);
        self.cards.len()
    }

    /// Both cards, once two are pending.
    #[must_use]
    pub fn pair(&self) -> Option<(CardId, CardId)> {
        match self.cards.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CardId] {
        &self.cards
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
