//! Chess-specific move ordering for improved alpha-beta pruning.

use std::cmp::Reverse;

use chess::ChessMove;

use crate::alpha_beta_searcher::MoveOrderer;
use crate::board::Position;
use crate::evaluate::material_value;

const CAPTURE_WEIGHT: i32 = 10;
const PROMOTION_BONUS: i32 = 100;
const CHECK_BONUS: i32 = 10;

/// Orders moves by a static priority: the value of the captured piece
/// dominates, then promotions, then checks. Moves of equal priority keep the
/// order the generator produced them in.
#[derive(Clone, Copy, Default, Debug)]
pub struct ChessMoveOrderer;

impl MoveOrderer<Position, ChessMove> for ChessMoveOrderer {
    #[inline]
    fn order_moves(&self, moves: &mut [ChessMove], state: &Position) {
        moves.sort_by_cached_key(|&chess_move| Reverse(move_priority(chess_move, state)));
    }
}

pub fn move_priority(chess_move: ChessMove, position: &Position) -> i32 {
    let mut priority = 0;

    if let Some(captured) = position.captured_piece(chess_move) {
        priority += CAPTURE_WEIGHT * material_value(captured);
    }
    if position.is_promotion(chess_move) {
        priority += PROMOTION_BONUS;
    }
    if position.gives_check(chess_move) {
        priority += CHECK_BONUS;
    }

    priority
}
