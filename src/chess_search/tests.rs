//! Chess-specific tests for the alpha-beta search.
//!
//! Test coverage:
//! - Mate in one for both colors, at several depths
//! - Pruned search agrees with full-width minimax on random positions
//! - Transposition tables with chess positions
//! - Terminal positions and evaluator choice

use chess::{ChessMove, Piece, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::alpha_beta_searcher::{Evaluator, SearchContext, SearchError, TranspositionTable};
use crate::board::Position;
use crate::evaluate::features::FEATURE_COUNT;
use crate::evaluate::{
    ChessEvaluator, HeuristicEvaluator, LayerParams, NetworkParams, MATE_SCORE,
};

use super::*;

const WHITE_BACK_RANK_MATE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
const BLACK_BACK_RANK_MATE: &str = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";
const KING_AND_PAWN_ENDGAME: &str = "8/8/4k3/8/2p5/8/1P3K2/8 w - - 0 1";

fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn heuristic() -> ChessEvaluator {
    ChessEvaluator::heuristic()
}

/// Plays `plies` random legal moves from the starting position, stopping
/// early if the game ends.
fn random_position(rng: &mut StdRng, plies: usize) -> Position {
    let mut board = Position::starting_position();
    for _ in 0..plies {
        let moves = board.legal_moves();
        if moves.is_empty() || board.is_terminal() {
            break;
        }
        let chess_move = moves[rng.gen_range(0..moves.len())];
        let _ = board.apply(chess_move);
    }
    board
}

#[test]
fn test_find_mate_in_1_white() {
    let expected = ChessMove::new(Square::A1, Square::A8, None);

    for depth in 1..=3 {
        let mut context = SearchContext::new(depth);
        let mut board = position(WHITE_BACK_RANK_MATE);

        let chess_move = search_best_move(&mut context, &mut board, &heuristic()).unwrap();
        assert_eq!(chess_move, expected, "depth {}", depth);
        assert_eq!(context.last_score(), Some(MATE_SCORE));

        let _ = board.apply(chess_move);
        assert_eq!(HeuristicEvaluator.evaluate(&board), MATE_SCORE);
    }
}

#[test]
fn test_find_mate_in_1_black() {
    let expected = ChessMove::new(Square::A8, Square::A1, None);

    for depth in 1..=3 {
        let mut context = SearchContext::new(depth);
        let mut board = position(BLACK_BACK_RANK_MATE);

        let chess_move = search_best_move(&mut context, &mut board, &heuristic()).unwrap();
        assert_eq!(chess_move, expected, "depth {}", depth);
        assert_eq!(context.last_score(), Some(-MATE_SCORE));

        let _ = board.apply(chess_move);
        assert_eq!(HeuristicEvaluator.evaluate(&board), -MATE_SCORE);
    }
}

#[test]
fn test_takes_hanging_queen() {
    // Black's queen on d5 is undefended and attacked by the knight on c3.
    let mut board = position("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1");
    let mut context = SearchContext::new(2);

    let chess_move = search_best_move(&mut context, &mut board, &heuristic()).unwrap();

    assert_eq!(chess_move, ChessMove::new(Square::C3, Square::D5, None));
}

#[test]
fn test_opening_move_from_starting_position() {
    let mut board = Position::starting_position();
    let mut context = SearchContext::new(4);

    let chess_move = search_best_move(&mut context, &mut board, &heuristic()).unwrap();

    assert!(board.is_legal(chess_move));
    let piece = board.piece_on(chess_move.get_source()).map(|(piece, _)| piece);
    assert!(
        matches!(piece, Some(Piece::Pawn) | Some(Piece::Knight)),
        "unexpected opening move {}",
        chess_move
    );
}

#[test]
fn test_search_leaves_position_unchanged() {
    let mut board = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let original = board;
    let mut context = SearchContext::with_transposition_table(3, TranspositionTable::new());

    search_best_move(&mut context, &mut board, &heuristic()).unwrap();

    assert_eq!(board, original);
    assert_eq!(board.to_fen(), original.to_fen());
}

#[test]
fn test_search_is_deterministic() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

    let run = || {
        let mut board = position(fen);
        let mut context = SearchContext::with_transposition_table(3, TranspositionTable::new());
        let chess_move = search_best_move(&mut context, &mut board, &heuristic()).unwrap();
        (chess_move, context.last_score(), context.searched_position_count())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_pruning_matches_full_width_search_on_random_positions() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let evaluator = heuristic();

    for _ in 0..6 {
        let plies = rng.gen_range(4..16);
        let mut board = random_position(&mut rng, plies);
        if board.is_terminal() {
            continue;
        }

        for depth in 1..=4 {
            let mut pruned = SearchContext::with_pruning(depth, true);
            let mut full = SearchContext::with_pruning(depth, false);

            let pruned_move = search_best_move(&mut pruned, &mut board, &evaluator).unwrap();
            let full_move = search_best_move(&mut full, &mut board, &evaluator).unwrap();

            assert_eq!(pruned_move, full_move, "{} at depth {}", board, depth);
            assert_eq!(pruned.last_score(), full.last_score(), "{} at depth {}", board, depth);
            assert!(pruned.searched_position_count() <= full.searched_position_count());
        }
    }
}

#[test]
fn test_pruning_matches_full_width_search_in_endgame() {
    let mut board = position(KING_AND_PAWN_ENDGAME);
    let evaluator = heuristic();

    let mut pruned = SearchContext::with_pruning(4, true);
    let mut full = SearchContext::with_pruning(4, false);
    assert!(pruned.is_pruning());
    assert!(!full.is_pruning());

    let pruned_move = search_best_move(&mut pruned, &mut board, &evaluator).unwrap();
    let full_move = search_best_move(&mut full, &mut board, &evaluator).unwrap();

    assert_eq!(pruned_move, full_move);
    assert_eq!(pruned.last_score(), full.last_score());
    assert!(pruned.searched_position_count() < full.searched_position_count());
    assert!(pruned.cutoffs() > 0);
    assert_eq!(full.cutoffs(), 0);
}

#[test]
fn test_transposition_table_reuse() {
    let mut board = position(KING_AND_PAWN_ENDGAME);
    let mut context = SearchContext::with_transposition_table(3, TranspositionTable::new());

    let first = search_best_move(&mut context, &mut board, &heuristic()).unwrap();
    let first_count = context.searched_position_count();
    assert!(context.tt_stores() > 0);

    context.reset_stats();
    let second = search_best_move(&mut context, &mut board, &heuristic()).unwrap();

    // The root itself is found in the table.
    assert_eq!(first, second);
    assert_eq!(context.searched_position_count(), 1);
    assert!(first_count > 1);
}

#[test]
fn test_transposition_table_finds_transpositions() {
    let mut board = position(KING_AND_PAWN_ENDGAME);
    let mut context = SearchContext::with_pruning(4, false);
    context.set_transposition_table(Some(TranspositionTable::new()));

    search_best_move(&mut context, &mut board, &heuristic()).unwrap();

    // 1. b3 Kd5 2. Ke2 and 1. Ke2 Kd5 2. b3 reach the same position.
    assert!(context.tt_hits() > 0);
}

#[test]
fn test_bounded_transposition_table() {
    let capacity = std::num::NonZeroUsize::new(64).unwrap();
    let mut board = position(KING_AND_PAWN_ENDGAME);
    let mut context =
        SearchContext::with_transposition_table(3, TranspositionTable::with_capacity(capacity));

    search_best_move(&mut context, &mut board, &heuristic()).unwrap();

    let table = context.transposition_table().unwrap();
    assert!(table.len() <= 64);
    assert_eq!(table.capacity(), Some(capacity));
}

#[test]
fn test_terminal_positions_are_rejected() {
    let mut context = SearchContext::new(3);
    let evaluator = heuristic();

    let mut checkmate =
        position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(
        search_best_move(&mut context, &mut checkmate, &evaluator),
        Err(SearchError::InvalidPosition)
    );

    let mut stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(
        search_best_move(&mut context, &mut stalemate, &evaluator),
        Err(SearchError::InvalidPosition)
    );

    let mut insufficient = position("8/8/4k3/8/8/3K4/8/8 w - - 0 1");
    assert_eq!(
        search_best_move(&mut context, &mut insufficient, &evaluator),
        Err(SearchError::InvalidPosition)
    );
}

#[test]
fn test_zero_depth_is_rejected() {
    let mut context = SearchContext::new(0);
    let mut board = Position::starting_position();

    assert_eq!(
        search_best_move(&mut context, &mut board, &heuristic()),
        Err(SearchError::DepthTooLow)
    );
}

#[test]
fn test_search_with_neural_evaluator() {
    let params = NetworkParams {
        hidden1: LayerParams {
            weights: vec![0.0; FEATURE_COUNT * 8],
            biases: vec![0.0; 8],
        },
        hidden2: LayerParams {
            weights: vec![0.0; 64],
            biases: vec![0.0; 8],
        },
        output: LayerParams {
            weights: vec![0.0; 8],
            biases: vec![1.0],
        },
    };
    let evaluator = ChessEvaluator::neural(params).unwrap();

    // A flat network cannot tell quiet moves apart, but still scores mate.
    let mut board = position(WHITE_BACK_RANK_MATE);
    let mut context = SearchContext::new(2);
    let chess_move = search_best_move(&mut context, &mut board, &evaluator).unwrap();
    assert_eq!(chess_move, ChessMove::new(Square::A1, Square::A8, None));

    let mut board = Position::starting_position();
    let chess_move = search_best_move(&mut context, &mut board, &evaluator).unwrap();
    assert!(board.is_legal(chess_move));
    assert_eq!(context.last_score(), Some(1.0));
}
