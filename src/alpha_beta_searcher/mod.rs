//! Generic, domain-agnostic alpha-beta search.
//!
//! The searcher only talks to the game through the traits in `traits`, so
//! the same code drives chess (see `chess_search`) and the toy games used in
//! the tests.

mod search;
mod traits;
pub mod transposition_table;


pub use search::{alpha_beta_search, SearchContext, SearchError};
pub use traits::{
    Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer, NoOpMoveOrderer,
    Score,
};
pub use transposition_table::{TTEntry, TranspositionTable};
