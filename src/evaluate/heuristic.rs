//! Handcrafted evaluation: material plus piece-square bonuses.

use chess::{Color, Piece, ALL_PIECES};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{Evaluator, Score};
use crate::board::Position;

use super::evaluation_tables::position_bonus;
use super::piece_values::material_value;
use super::terminal_score;

#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<Position> for HeuristicEvaluator {
    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn evaluate(&self, position: &Position) -> Score {
        match terminal_score(position) {
            Some(score) => score,
            None => (material_score(position) + positional_score(position)) as Score,
        }
    }
}

/// White's material minus Black's material.
pub fn material_score(position: &Position) -> i32 {
    ALL_PIECES
        .iter()
        .map(|&piece| {
            let white = position.locate(piece, Color::White).popcnt() as i32;
            let black = position.locate(piece, Color::Black).popcnt() as i32;
            (white - black) * material_value(piece)
        })
        .sum()
}

/// Sum of the piece-square bonuses of White's pieces minus Black's.
pub fn positional_score(position: &Position) -> i32 {
    let is_endgame = is_endgame(position);
    let board = position.board();
    let mut score = 0;

    for square in *board.combined() {
        if let Some((piece, color)) = position.piece_on(square) {
            let bonus = position_bonus(piece, color, square, is_endgame);
            match color {
                Color::White => score += bonus,
                Color::Black => score -= bonus,
            }
        }
    }

    score
}

/// Endgame conditions:
/// 1. There are no queens on the board, or
/// 2. Exactly two queens remain alongside at most two minor pieces in total.
pub fn is_endgame(position: &Position) -> bool {
    let queens = position.count(Piece::Queen);
    let minor_pieces = position.count(Piece::Knight) + position.count(Piece::Bishop);

    queens == 0 || (queens == 2 && minor_pieces <= 2)
}
