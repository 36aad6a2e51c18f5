//! Board generation: two cards per derby, uniformly shuffled.

use im::Vector;
use log::debug;

use super::state::Board;
use crate::cards::{Card, CardFace, CardId, DerbyCatalog};
use crate::core::GameRng;

/// Build a fresh, fully face-down board from `catalog`.
///
/// Each derby contributes a team A card and a team B card sharing its
/// group. The 2N cards are shuffled with Fisher-Yates and numbered by
/// their final position.
///
/// ```
/// use derby_memory::board::build_board;
/// use derby_memory::cards::DerbyCatalog;
/// use derby_memory::core::GameRng;
///
/// let catalog = DerbyCatalog::reference();
/// let board = build_board(&catalog, &mut GameRng::new(1));
///
/// assert_eq!(board.len(), 16);
/// assert_eq!(board.unmatched_count(), 16);
/// ```
#[must_use]
pub fn build_board(catalog: &DerbyCatalog, rng: &mut GameRng) -> Board {
    let mut faces: Vec<_> = catalog
        .iter()
        .flat_map(|derby| {
            derby.teams().map(|team| {
                (
                    derby.group,
                    CardFace {
                        team: team.clone(),
                        derby_name: derby.name.clone(),
                    },
                )
            })
        })
        .collect();

    rng.shuffle(&mut faces);

    let cards: Vector<Card> = faces
        .into_iter()
        .enumerate()
        .map(|(position, (group, face))| Card::new(CardId::new(position as u32), group, face))
        .collect();

    let board = Board::from_cards(cards);
    board.check_pairing();

    debug!("built board of {} cards from {} derbies", board.len(), catalog.len());
    board
}
