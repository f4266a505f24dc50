//! Chess-specific implementation of the alpha-beta search traits.

pub mod implementation;
pub mod move_orderer;

#[cfg(test)]
mod tests;

pub use implementation::{search_best_move, ChessMoveGenerator, ChessSearchContext};
pub use move_orderer::ChessMoveOrderer;
