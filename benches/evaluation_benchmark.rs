use chessbot::alpha_beta_searcher::Evaluator;
use chessbot::board::Position;
use chessbot::evaluate::features::encode;
use chessbot::evaluate::{HeuristicEvaluator, NetworkParams, NeuralEvaluator};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MIDDLEGAME: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

fn criterion_benchmark(c: &mut Criterion) {
    let board = Position::from_fen(MIDDLEGAME).unwrap();

    let values: Vec<f32> = (0..NetworkParams::PARAMETER_COUNT)
        .map(|i| ((i % 17) as f32 - 8.0) / 64.0)
        .collect();
    let network = NeuralEvaluator::from_flat(&values).unwrap();

    c.bench_function("heuristic evaluation", |b| {
        b.iter(|| HeuristicEvaluator.evaluate(black_box(&board)))
    });
    c.bench_function("feature encoding", |b| b.iter(|| encode(black_box(&board))));
    c.bench_function("neural evaluation", |b| {
        b.iter(|| network.evaluate(black_box(&board)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
