use std::num::NonZeroUsize;
use std::time::Duration;

use chess::ChessMove;
use log::debug;

use crate::alpha_beta_searcher::{Score, SearchContext, SearchError, TranspositionTable};
use crate::board::Position;
use crate::chess_search::{search_best_move, ChessSearchContext};
use crate::evaluate::ChessEvaluator;

pub type ChessTranspositionTable = TranspositionTable<String, ChessMove>;

/// How search results are cached between nodes and between searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheConfig {
    Disabled,
    Unbounded,
    /// Least recently used entries are evicted once the table is full.
    Bounded(NonZeroUsize),
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::Unbounded
    }
}

impl CacheConfig {
    fn build(self) -> Option<ChessTranspositionTable> {
        match self {
            CacheConfig::Disabled => None,
            CacheConfig::Unbounded => Some(TranspositionTable::new()),
            CacheConfig::Bounded(capacity) => Some(TranspositionTable::with_capacity(capacity)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub pruning: bool,
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 4, // Default search depth
            pruning: true,
            cache: CacheConfig::default(),
        }
    }
}

/// Picks moves for positions handed to it. The transposition table, if any,
/// lives as long as the engine and is shared by all of its searches.
pub struct Engine {
    evaluator: ChessEvaluator,
    search_context: ChessSearchContext,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default(), ChessEvaluator::default())
    }
}

impl Engine {
    pub fn new(
        max_depth: u8,
        evaluator: ChessEvaluator,
        transposition_table: Option<ChessTranspositionTable>,
    ) -> Self {
        let mut search_context = SearchContext::new(max_depth);
        search_context.set_transposition_table(transposition_table);
        Self {
            evaluator,
            search_context,
        }
    }

    pub fn with_config(config: EngineConfig, evaluator: ChessEvaluator) -> Self {
        let mut engine = Self::new(config.search_depth, evaluator, config.cache.build());
        engine.search_context.set_pruning(config.pruning);
        engine
    }

    /// Returns the best move for the side to move. `position` is restored
    /// before this returns, whether or not the search succeeds.
    pub fn search(&mut self, position: &mut Position) -> Result<ChessMove, SearchError> {
        self.search_context.reset_stats();
        let best_move = search_best_move(&mut self.search_context, position, &self.evaluator)?;

        debug!(
            "best move {} for {} (score {:?}, {} positions)",
            best_move,
            position,
            self.last_score(),
            self.searched_position_count()
        );

        Ok(best_move)
    }

    pub fn evaluator(&self) -> &ChessEvaluator {
        &self.evaluator
    }

    pub fn search_depth(&self) -> u8 {
        self.search_context.search_depth()
    }

    pub fn transposition_table(&self) -> Option<&ChessTranspositionTable> {
        self.search_context.transposition_table()
    }

    pub fn last_score(&self) -> Option<Score> {
        self.search_context.last_score()
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.search_context.last_search_duration()
    }

    pub fn searched_position_count(&self) -> usize {
        self.search_context.searched_position_count()
    }

    pub fn clear_cache(&mut self) {
        if let Some(table) = self.search_context.transposition_table_mut() {
            debug!("clearing {} cached positions", table.len());
            table.clear();
        }
    }
}
