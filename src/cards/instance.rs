//! Card instances - runtime card state.
//!
//! A `Card` is one of the 2N playable units on a board. Its identity
//! (`card_id`, `group`) and face are fixed when the board is built; only
//! the flipped/matched flags change during play.

use serde::{Deserialize, Serialize};

use super::definition::{GroupId, TeamInfo};

/// Position-derived card identifier, `0..2N` on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Board position of this card.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a revealed card shows, copied from the catalog at build time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub team: TeamInfo,
    pub derby_name: String,
}

/// A card on the board.
///
/// Invariant: `is_matched` implies `is_flipped`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    pub group: GroupId,
    pub face: CardFace,
    is_flipped: bool,
    is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(card_id: CardId, group: GroupId, face: CardFace) -> Self {
        Self {
            card_id,
            group,
            face,
            is_flipped: false,
            is_matched: false,
        }
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    /// Face-down and unresolved: the only state a selection accepts.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    pub(crate) fn flip_up(&mut self) {
        self.is_flipped = true;
    }

    /// Turn back over. Matched cards stay face-up.
    pub(crate) fn flip_down(&mut self) {
        if !self.is_matched {
            self.is_flipped = false;
        }
    }

    pub(crate) fn mark_matched(&mut self) {
        self.is_flipped = true;
        self.is_matched = true;
    }

    /// Render-safe view: the face is withheld while face-down.
    #[must_use]
    pub fn view(&self) -> CardView<'_> {
        CardView {
            card_id: self.card_id,
            face: self.is_flipped.then_some(&self.face),
            is_matched: self.is_matched,
        }
    }
}

/// What the shell may draw for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardView<'a> {
    pub card_id: CardId,
    /// `None` while face-down.
    pub face: Option<&'a CardFace>,
    pub is_matched: bool,
}
