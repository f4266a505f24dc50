//! Alpha-beta search algorithm implementation.
//!
//! # Core Algorithm
//!
//! Fixed-depth minimax where the maximizing and minimizing players alternate
//! every ply. Alpha is the best score the maximizer is already guaranteed,
//! beta the best score the minimizer is already guaranteed. As soon as
//! `beta <= alpha` the remaining moves of a node cannot influence the result
//! and are skipped. The algorithm selects the same move as plain minimax but
//! visits fewer positions.
//!
//! # Transposition Table
//!
//! When the `SearchContext` owns a table, every node is probed before it is
//! expanded and its result is stored after. Entries only count as hits when
//! the stored depth equals the remaining depth of the node.
//!
//! # Move Ordering
//!
//! Moves are sorted by the `MoveOrderer` before being searched. Good ordering
//! raises alpha (or lowers beta) early, which produces more cutoffs.

use std::time::{Duration, Instant};

use log::{debug, trace};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::transposition_table::TranspositionTable;
use super::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer, Score};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("invalid position: the game is already over, there is no move to search")]
    InvalidPosition,
    #[error("no available moves")]
    NoAvailableMoves,
}

/// Search configuration parameters.
struct SearchConfig {
    depth: u8,
    pruning: bool,
}

impl SearchConfig {
    fn new(depth: u8, pruning: bool) -> Self {
        Self { depth, pruning }
    }
}

/// Statistics collected during search.
#[derive(Default)]
struct SearchStats {
    position_count: usize,
    cutoffs: usize,
    tt_probes: usize,
    tt_stores: usize,
    last_score: Option<Score>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_result(&mut self, score: Score, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Everything a search session needs besides the game itself: the target
/// depth, whether pruning is enabled, the optional transposition table and
/// the statistics of the last run.
pub struct SearchContext<K: std::hash::Hash + Eq, M: Clone> {
    config: SearchConfig,
    stats: SearchStats,
    transposition_table: Option<TranspositionTable<K, M>>,
}

impl<K: std::hash::Hash + Eq, M: Clone> SearchContext<K, M> {
    /// A context that searches `depth` plies with pruning and no cache.
    pub fn new(depth: u8) -> Self {
        Self {
            config: SearchConfig::new(depth, true),
            stats: SearchStats::default(),
            transposition_table: None,
        }
    }

    pub fn with_transposition_table(depth: u8, table: TranspositionTable<K, M>) -> Self {
        let mut context = Self::new(depth);
        context.transposition_table = Some(table);
        context
    }

    /// With `pruning` disabled the search expands every node, i.e. it is a
    /// full-width minimax.
    pub fn with_pruning(depth: u8, pruning: bool) -> Self {
        let mut context = Self::new(depth);
        context.config.pruning = pruning;
        context
    }

    pub fn set_pruning(&mut self, pruning: bool) {
        self.config.pruning = pruning;
    }

    pub fn is_pruning(&self) -> bool {
        self.config.pruning
    }

    pub fn set_transposition_table(&mut self, table: Option<TranspositionTable<K, M>>) {
        self.transposition_table = table;
    }

    pub fn transposition_table(&self) -> Option<&TranspositionTable<K, M>> {
        self.transposition_table.as_ref()
    }

    pub fn transposition_table_mut(&mut self) -> Option<&mut TranspositionTable<K, M>> {
        self.transposition_table.as_mut()
    }

    pub fn take_transposition_table(&mut self) -> Option<TranspositionTable<K, M>> {
        self.transposition_table.take()
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn search_depth(&self) -> u8 {
        self.config.depth
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn cutoffs(&self) -> usize {
        self.stats.cutoffs
    }

    pub fn tt_probes(&self) -> usize {
        self.stats.tt_probes
    }

    pub fn tt_stores(&self) -> usize {
        self.stats.tt_stores
    }

    pub fn tt_hits(&self) -> usize {
        self.transposition_table
            .as_ref()
            .map_or(0, TranspositionTable::hits)
    }

    pub fn last_score(&self) -> Option<Score> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }
}

/// Applies a move, executes a closure with the new state, then undoes the move.
///
/// This is the only place the searcher mutates the state, so every `apply`
/// is paired with exactly one `undo` no matter how the closure's caller
/// leaves the move loop afterwards.
fn with_move_applied<S, M, F, R>(game_move: &M, state: &mut S, f: F) -> R
where
    S: GameState,
    M: GameMove<State = S>,
    F: FnOnce(&mut S) -> R,
{
    let token = game_move.apply(state);
    let result = f(state);
    game_move.undo(state, token);
    result
}

/// Updates best score and move if new score is better.
/// Returns true if best_score was updated.
fn update_best<M: Clone>(
    score: Score,
    candidate_move: &M,
    maximizing_player: bool,
    best_score: &mut Score,
    best_move: &mut Option<M>,
) -> bool {
    let is_better = if maximizing_player {
        score > *best_score
    } else {
        score < *best_score
    };

    if is_better {
        *best_score = score;
        *best_move = Some(candidate_move.clone());
    }
    is_better
}

/// Searches for the best move using fixed-depth alpha-beta pruning.
///
/// # Returns
///
/// - `Ok(best_move)` - The best move found at the context's depth
/// - `Err(SearchError::DepthTooLow)` - If search depth is < 1
/// - `Err(SearchError::InvalidPosition)` - If the state is terminal
/// - `Err(SearchError::NoAvailableMoves)` - If no legal moves available
///
/// All errors are detected before the traversal starts; a search either
/// completes or does not touch the state at all.
///
/// # Examples
///
/// ```ignore
/// let mut context = SearchContext::new(4);
/// let best_move = alpha_beta_search(
///     &mut context,
///     &mut state,
///     &move_gen,
///     &evaluator,
///     &move_orderer,
/// )?;
/// ```
#[must_use = "search returns the best move found"]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn alpha_beta_search<S, G, E, O>(
    context: &mut SearchContext<S::Key, G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<G::Move, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let depth = context.search_depth();
    debug!("alpha-beta search depth: {}", depth);

    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }
    if state.is_terminal() {
        return Err(SearchError::InvalidPosition);
    }
    if move_generator.generate_moves(state).is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    let start = Instant::now();
    let maximizing = state.is_maximizing_player();

    let (score, best_move) = search_node(
        context,
        state,
        move_generator,
        evaluator,
        move_orderer,
        depth,
        Score::NEG_INFINITY,
        Score::INFINITY,
        maximizing,
    );

    context.stats.record_result(score, start.elapsed());
    debug!(
        "search finished: score {}, {} positions, {} cutoffs, {} tt hits",
        score,
        context.stats.position_count,
        context.stats.cutoffs,
        context.tt_hits()
    );

    best_move.ok_or(SearchError::NoAvailableMoves)
}

#[allow(clippy::too_many_arguments)]
fn search_node<S, G, E, O>(
    context: &mut SearchContext<S::Key, G::Move>,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing_player: bool,
) -> (Score, Option<G::Move>)
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.stats.position_count += 1;

    let key = context
        .transposition_table
        .as_ref()
        .map(|_| state.position_key());

    if let (Some(table), Some(key)) = (context.transposition_table.as_mut(), key.as_ref()) {
        context.stats.tt_probes += 1;
        if let Some(entry) = table.get(key, depth) {
            trace!("tt hit at depth {}: {:?}", depth, key);
            return (entry.score, entry.best_move);
        }
    }

    if depth == 0 || state.is_terminal() {
        return (evaluator.evaluate(state), None);
    }

    let mut candidates = move_generator.generate_moves(state);
    move_orderer.order_moves(candidates.as_mut(), state);

    let mut best_score = if maximizing_player {
        Score::NEG_INFINITY
    } else {
        Score::INFINITY
    };
    let mut best_move = None;

    for candidate in candidates.as_ref() {
        let (score, _) = with_move_applied(candidate, state, |child| {
            search_node(
                context,
                child,
                move_generator,
                evaluator,
                move_orderer,
                depth - 1,
                alpha,
                beta,
                !maximizing_player,
            )
        });

        update_best(
            score,
            candidate,
            maximizing_player,
            &mut best_score,
            &mut best_move,
        );

        if maximizing_player {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }

        if context.is_pruning() && beta <= alpha {
            context.stats.cutoffs += 1;
            trace!("cutoff at depth {} after {:?}", depth, candidate);
            break;
        }
    }

    if let (Some(table), Some(key)) = (context.transposition_table.as_mut(), key) {
        context.stats.tt_stores += 1;
        table.put(key, depth, best_score, best_move.clone());
    }

    (best_score, best_move)
}
