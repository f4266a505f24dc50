//! Adapter around the `chess` crate, which owns the rules of the game.
//!
//! The search only needs a narrow view of a position: legal moves, terminal
//! status, the side to move, a few per-move queries used for ordering, and a
//! stable key for the transposition table. `Position` provides exactly that.

pub mod error;


use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Square, EMPTY};
use smallvec::SmallVec;

use error::BoardError;

pub type ChessMoveList = SmallVec<[ChessMove; 64]>;

/// Outcome of a position from the point of view of the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Token returned by `Position::apply`, consumed by `Position::undo`.
///
/// `chess::Board` is a small `Copy` value, so the token simply holds the
/// board as it was before the move. Restoring it reverses every piece of
/// derived state (castling rights, en passant target, hash).
#[derive(Clone, Copy)]
#[must_use = "an applied move must be undone with its token"]
pub struct MoveUndo {
    previous: Board,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Position {
    pub fn starting_position() -> Self {
        Self {
            board: Board::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let board = Board::from_str(fen.trim()).map_err(|_| BoardError::InvalidFen {
            fen: fen.to_string(),
        })?;
        Ok(Self { board })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_fen(&self) -> String {
        self.board.to_string()
    }

    pub fn turn(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn piece_on(&self, square: Square) -> Option<(Piece, Color)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece, color))
    }

    /// Squares occupied by `piece` of `color`.
    pub fn locate(&self, piece: Piece, color: Color) -> BitBoard {
        *self.board.pieces(piece) & *self.board.color_combined(color)
    }

    /// Number of `piece`s of either color on the board.
    pub fn count(&self, piece: Piece) -> u32 {
        self.board.pieces(piece).popcnt()
    }

    pub fn legal_moves(&self) -> ChessMoveList {
        MoveGen::new_legal(&self.board).collect()
    }

    pub fn is_legal(&self, chess_move: ChessMove) -> bool {
        self.board.legal(chess_move)
    }

    pub fn is_in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    pub fn status(&self) -> GameStatus {
        match self.board.status() {
            BoardStatus::Checkmate => GameStatus::Checkmate,
            BoardStatus::Stalemate => GameStatus::Stalemate,
            BoardStatus::Ongoing if self.is_insufficient_material() => {
                GameStatus::InsufficientMaterial
            }
            BoardStatus::Ongoing => GameStatus::Ongoing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Neither side can ever deliver mate: no pawns, rooks or queens remain,
    /// and the minor pieces are either a single piece or bishops that all
    /// stand on squares of the same color.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = self.count(Piece::Pawn) + self.count(Piece::Rook) + self.count(Piece::Queen);
        if heavy > 0 {
            return false;
        }

        let knights = self.count(Piece::Knight);
        let bishops = *self.board.pieces(Piece::Bishop);
        if knights + bishops.popcnt() <= 1 {
            return true;
        }
        if knights > 0 {
            return false;
        }

        let mut shades = bishops.map(is_light_square);
        match shades.next() {
            Some(first) => shades.all(|shade| shade == first),
            None => true,
        }
    }

    pub fn gives_check(&self, chess_move: ChessMove) -> bool {
        *self.board.make_move_new(chess_move).checkers() != EMPTY
    }

    /// The piece removed from the board by `chess_move`, if any. En passant
    /// captures report a pawn even though the destination square is empty.
    pub fn captured_piece(&self, chess_move: ChessMove) -> Option<Piece> {
        let source = chess_move.get_source();
        let dest = chess_move.get_dest();

        if let Some(piece) = self.board.piece_on(dest) {
            return Some(piece);
        }

        let is_pawn = self.board.piece_on(source) == Some(Piece::Pawn);
        let changes_file = source.get_file() != dest.get_file();
        if is_pawn && changes_file {
            return Some(Piece::Pawn);
        }

        None
    }

    pub fn is_promotion(&self, chess_move: ChessMove) -> bool {
        chess_move.get_promotion().is_some()
    }

    /// Plays `chess_move`, returning the token that reverses it.
    pub fn apply(&mut self, chess_move: ChessMove) -> MoveUndo {
        let previous = self.board;
        self.board = previous.make_move_new(chess_move);
        MoveUndo { previous }
    }

    pub fn undo(&mut self, token: MoveUndo) {
        self.board = token.previous;
    }
}

fn is_light_square(square: Square) -> bool {
    (square.get_rank().to_index() + square.get_file().to_index()) % 2 == 1
}

impl FromStr for Position {
    type Err = BoardError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Self::from_fen(fen)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Position").field(&self.to_fen()).finish()
    }
}
