//! Chess-specific trait implementations for the alpha-beta search.

use chess::{ChessMove, Color};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{
    alpha_beta_search, GameMove, GameState, MoveCollection, MoveGenerator, SearchContext,
    SearchError,
};
use crate::board::{ChessMoveList, MoveUndo, Position};
use crate::evaluate::ChessEvaluator;

use super::move_orderer::ChessMoveOrderer;

/// Search context keyed the way chess positions are keyed.
pub type ChessSearchContext = SearchContext<String, ChessMove>;

impl GameState for Position {
    /// The FEN string. Two positions share a key exactly when they agree on
    /// placement, side to move, castling rights and en passant target.
    type Key = String;

    #[inline]
    fn position_key(&self) -> String {
        self.to_fen()
    }

    #[inline]
    fn is_maximizing_player(&self) -> bool {
        self.turn() == Color::White
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        Position::is_terminal(self)
    }
}

impl GameMove for ChessMove {
    type State = Position;
    type Undo = MoveUndo;

    #[inline]
    fn apply(&self, state: &mut Position) -> MoveUndo {
        state.apply(*self)
    }

    #[inline]
    fn undo(&self, state: &mut Position, token: MoveUndo) {
        state.undo(token)
    }
}

impl MoveCollection<ChessMove> for ChessMoveList {}

#[derive(Clone, Copy, Debug, Default)]
pub struct ChessMoveGenerator;

impl ChessMoveGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl MoveGenerator<Position> for ChessMoveGenerator {
    type Move = ChessMove;
    type MoveList = ChessMoveList;

    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn generate_moves(&self, state: &Position) -> ChessMoveList {
        state.legal_moves()
    }
}

/// Searches for the best chess move from the given position.
///
/// The position is left exactly as it was passed in.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut ChessSearchContext,
    position: &mut Position,
    evaluator: &ChessEvaluator,
) -> Result<ChessMove, SearchError> {
    let move_generator = ChessMoveGenerator::new();
    let move_orderer = ChessMoveOrderer;

    alpha_beta_search(context, position, &move_generator, evaluator, &move_orderer)
}
