//! Player actions and the session history.
//!
//! Only two things can happen to a session from outside: a card is
//! selected, or the game is reset. Every accepted action is recorded
//! with the turn it happened in, so shells can show a move count and
//! games can be replayed against the same seed.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;

/// An accepted player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A face-down card was turned over.
    Select(CardId),
    /// The board was rebuilt.
    Reset,
}

impl Action {
    /// The selected card, if this is a selection.
    #[must_use]
    pub fn card(self) -> Option<CardId> {
        match self {
            Action::Select(card) => Some(card),
            Action::Reset => None,
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (0 or 1 for selections).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_card() {
        assert_eq!(Action::Select(CardId::new(4)).card(), Some(CardId::new(4)));
        assert_eq!(Action::Reset.card(), None);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(PlayerId::new(1), Action::Select(CardId::new(5)), 2, 1);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
