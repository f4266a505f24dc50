//! Calculate best move command - determine the best move from a position.

use std::num::NonZeroUsize;

use chessbot::board::Position;
use chessbot::engine::{CacheConfig, Engine, EngineConfig};
use chessbot::evaluate::ChessEvaluator;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(
        long = "fen",
        default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    )]
    pub starting_position: Position,
    /// Expand every node (plain minimax).
    #[structopt(long)]
    pub no_pruning: bool,
    /// Search without a transposition table (takes precedence over `--cache-capacity`).
    #[structopt(long)]
    pub no_cache: bool,
    /// Bound the transposition table to this many positions.
    #[structopt(long)]
    pub cache_capacity: Option<NonZeroUsize>,
}

impl CalculateBestMoveArgs {
    fn cache_config(&self) -> CacheConfig {
        match (self.no_cache, self.cache_capacity) {
            (true, _) => CacheConfig::Disabled,
            (false, Some(capacity)) => CacheConfig::Bounded(capacity),
            (false, None) => CacheConfig::Unbounded,
        }
    }
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let config = EngineConfig {
            search_depth: self.depth,
            pruning: !self.no_pruning,
            cache: self.cache_config(),
        };
        let mut engine = Engine::with_config(config, ChessEvaluator::heuristic());
        let mut position = self.starting_position;

        match engine.search(&mut position) {
            Ok(best_move) => println!("{}", best_move),
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
