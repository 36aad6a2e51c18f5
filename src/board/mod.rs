//! Board state and generation.
//!
//! - `Board`: the 2N cards of one game, in play order
//! - `build_board`: the board generator (pair, shuffle, number)

mod generator;
mod state;

pub use generator::build_board;
pub use state::Board;
