//! The playable board.
//!
//! `Board` is the ordered sequence of 2N cards. It is stored in a
//! persistent `im::Vector`, so handing a snapshot to the shell is an O(1)
//! clone that later moves cannot disturb.
//!
//! Only the state machine mutates a board; everything public is a query.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardView, GroupId};

/// Ordered cards, each `card_id` equal to its position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vector<Card>,
}

impl Board {
    pub(crate) fn from_cards(cards: Vector<Card>) -> Self {
        Self { cards }
    }

    /// Number of cards (2N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, card: CardId) -> Option<&Card> {
        self.cards.get(card.index())
    }

    /// Iterate in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards not yet resolved, face-up or not.
    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_matched()).count()
    }

    /// Every pair has been found.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }

    /// Cards a player may select right now (ignoring the input lock).
    pub fn face_down(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards
            .iter()
            .filter(|c| c.is_selectable())
            .map(|c| c.card_id)
    }

    /// Both cards of a group.
    pub fn cards_in_group(&self, group: GroupId) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.group == group)
    }

    /// Render-safe views of every card, in board order.
    #[must_use]
    pub fn views(&self) -> Vec<CardView<'_>> {
        self.cards.iter().map(Card::view).collect()
    }

    pub(crate) fn flip_up(&mut self, card: CardId) {
        if let Some(c) = self.cards.get_mut(card.index()) {
            c.flip_up();
        }
    }

    pub(crate) fn flip_down(&mut self, card: CardId) {
        if let Some(c) = self.cards.get_mut(card.index()) {
            c.flip_down();
        }
    }

    /// Resolve every card of `group`. Returns how many were marked.
    pub(crate) fn mark_group_matched(&mut self, group: GroupId) -> usize {
        let mut marked = 0;
        for card in self.cards.iter_mut().filter(|c| c.group == group) {
            card.mark_matched();
            marked += 1;
        }
        marked
    }

    /// Check the pairing invariant.
    ///
    /// Every group appears on exactly two cards and card ids are the
    /// contiguous positions `0..len`. A violation is a generator bug.
    ///
    /// # Panics
    ///
    /// Panics if the invariant does not hold.
    pub fn check_pairing(&self) {
        let mut counts: FxHashMap<GroupId, usize> = FxHashMap::default();

        for (position, card) in self.cards.iter().enumerate() {
            assert_eq!(
                card.card_id.index(),
                position,
                "{} sits at position {position}",
                card.card_id
            );
            *counts.entry(card.group).or_default() += 1;
        }

        for (group, count) in counts {
            assert_eq!(count, 2, "{group} appears on {count} cards");
        }
    }
}
