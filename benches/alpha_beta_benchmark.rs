use chessbot::alpha_beta_searcher::{SearchContext, TranspositionTable};
use chessbot::board::Position;
use chessbot::chess_search::search_best_move;
use chessbot::evaluate::ChessEvaluator;

use criterion::{criterion_group, criterion_main, Criterion};

const MIDDLEGAME: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
const BACK_RANK_MATE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha beta");
    group.sample_size(10);

    group.bench_function("starting position depth 4", |b| {
        b.iter(|| search(Position::starting_position(), 4, true, false))
    });
    group.bench_function("starting position depth 4 with cache", |b| {
        b.iter(|| search(Position::starting_position(), 4, true, true))
    });
    group.bench_function("middlegame depth 3 without pruning", |b| {
        b.iter(|| search(position(MIDDLEGAME), 3, false, false))
    });
    group.bench_function("middlegame depth 3", |b| {
        b.iter(|| search(position(MIDDLEGAME), 3, true, false))
    });
    group.bench_function("back rank mate depth 4", |b| {
        b.iter(|| search(position(BACK_RANK_MATE), 4, true, true))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn search(mut board: Position, depth: u8, pruning: bool, cache: bool) {
    let mut context = SearchContext::with_pruning(depth, pruning);
    if cache {
        context.set_transposition_table(Some(TranspositionTable::new()));
    }
    let evaluator = ChessEvaluator::heuristic();

    search_best_move(&mut context, &mut board, &evaluator).unwrap();
}
