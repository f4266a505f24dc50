//! Position evaluation.
//!
//! Two evaluators share one scoring convention: scores are from White's point
//! of view, checkmate is worth `MATE_SCORE` to the winning side, and drawn
//! positions (stalemate, insufficient material) score exactly 0.

mod evaluation_tables;
pub mod features;
pub mod heuristic;
pub mod neural;
mod piece_values;

use chess::Color;

use crate::alpha_beta_searcher::{Evaluator, Score};
use crate::board::{GameStatus, Position};

pub use heuristic::HeuristicEvaluator;
pub use neural::{LayerParams, NetworkLoadError, NetworkParams, NeuralEvaluator};
pub(crate) use piece_values::material_value;

/// Score of a position in which Black has been checkmated. Larger than any
/// material or network score.
pub const MATE_SCORE: Score = Score::MAX;

/// Score of a finished game, or `None` while it is still being played.
#[inline]
pub fn terminal_score(position: &Position) -> Option<Score> {
    match position.status() {
        GameStatus::Ongoing => None,
        GameStatus::Checkmate => match position.turn() {
            Color::White => Some(-MATE_SCORE),
            Color::Black => Some(MATE_SCORE),
        },
        GameStatus::Stalemate | GameStatus::InsufficientMaterial => Some(0.0),
    }
}

/// The evaluator used by the chess search.
#[derive(Clone, Debug)]
pub enum ChessEvaluator {
    Heuristic(HeuristicEvaluator),
    Neural(NeuralEvaluator),
}

impl ChessEvaluator {
    pub fn heuristic() -> Self {
        Self::Heuristic(HeuristicEvaluator::new())
    }

    pub fn neural(params: NetworkParams) -> Result<Self, NetworkLoadError> {
        Ok(Self::Neural(NeuralEvaluator::new(params)?))
    }
}

impl Default for ChessEvaluator {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl From<HeuristicEvaluator> for ChessEvaluator {
    fn from(evaluator: HeuristicEvaluator) -> Self {
        Self::Heuristic(evaluator)
    }
}

impl From<NeuralEvaluator> for ChessEvaluator {
    fn from(evaluator: NeuralEvaluator) -> Self {
        Self::Neural(evaluator)
    }
}

impl Evaluator<Position> for ChessEvaluator {
    #[inline]
    fn evaluate(&self, position: &Position) -> Score {
        match self {
            Self::Heuristic(evaluator) => evaluator.evaluate(position),
            Self::Neural(evaluator) => evaluator.evaluate(position),
        }
    }
}
