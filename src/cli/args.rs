//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{calculate_best_move::CalculateBestMoveArgs, evaluate::EvaluateArgs};

#[derive(StructOpt)]
#[structopt(
    name = "chessbot",
    about = "A fixed-depth alpha-beta chess engine implemented in Rust ♛"
)]
pub enum Chessbot {
    #[structopt(
        name = "calculate-best-move",
        about = "Use the chess engine to determine the best move from a given position, provided in FEN notation with `--fen` (default: starting position). You can optionally specify the depth of the search with the `--depth` arg (default: 4), disable alpha-beta pruning with `--no-pruning`, and control the transposition table with `--no-cache` or `--cache-capacity`."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "evaluate",
        about = "Print the game status, the endgame flag and the static heuristic score of a position, provided in FEN notation with `--fen` (default: starting position)."
    )]
    Evaluate(EvaluateArgs),
}

impl crate::cli::commands::Command for Chessbot {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            CalculateBestMove(cmd),
            Evaluate(cmd),
        }
    }
}
