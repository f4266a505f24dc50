//! Evaluate command - print the static evaluation of a position.

use chessbot::alpha_beta_searcher::Evaluator;
use chessbot::board::Position;
use chessbot::evaluate::heuristic::{self, HeuristicEvaluator};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct EvaluateArgs {
    #[structopt(
        long = "fen",
        default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    )]
    pub position: Position,
}

impl Command for EvaluateArgs {
    fn execute(self) {
        let position = self.position;

        println!("status: {:?}", position.status());
        println!("endgame: {}", heuristic::is_endgame(&position));
        println!("score: {}", HeuristicEvaluator.evaluate(&position));
    }
}
