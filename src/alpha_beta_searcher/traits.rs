//! Core traits for generic alpha-beta search.

use std::fmt::Debug;
use std::hash::Hash;

/// Score of a position. Positive values favor the maximizing player.
pub type Score = f32;

/// Represents the state of a two-player zero-sum game.
pub trait GameState {
    /// Canonical identity of a position, used as the transposition table key.
    /// Distinct positions must never share a key.
    type Key: Eq + Hash + Clone + Debug;

    fn position_key(&self) -> Self::Key;

    /// Returns true if the current player is the maximizing player.
    fn is_maximizing_player(&self) -> bool;

    /// Returns true if the game is over in this position (no further moves
    /// are searched, the evaluator scores it directly).
    fn is_terminal(&self) -> bool;
}

/// Represents an action that can be applied to and undone from a game state.
///
/// `apply` hands back a token describing how to reverse the move; `undo` must
/// be called with that token, in strict LIFO order, to restore the state.
pub trait GameMove: Clone + PartialEq + Debug {
    type State: GameState;
    type Undo;

    fn apply(&self, state: &mut Self::State) -> Self::Undo;

    fn undo(&self, state: &mut Self::State, token: Self::Undo);
}

/// Generates all legal moves from a given game state.
pub trait MoveGenerator<S: GameState> {
    type Move: GameMove<State = S>;
    type MoveList: MoveCollection<Self::Move>;

    /// Generates all legal moves for the current player.
    fn generate_moves(&self, state: &S) -> Self::MoveList;
}

/// Evaluates a game position and returns a score.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state. Higher scores favor the maximizing player.
    fn evaluate(&self, state: &S) -> Score;
}

/// Orders moves to improve alpha-beta pruning efficiency.
pub trait MoveOrderer<S: GameState, M> {
    /// Sorts moves in-place, placing "better" moves first.
    fn order_moves(&self, moves: &mut [M], state: &S);
}

/// A no-op move orderer for games without move ordering heuristics.
#[derive(Clone, Default, Debug)]
pub struct NoOpMoveOrderer;

impl<S: GameState, M> MoveOrderer<S, M> for NoOpMoveOrderer {
    #[inline(always)]
    fn order_moves(&self, _moves: &mut [M], _state: &S) {}
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}
