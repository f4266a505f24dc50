use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid FEN string: {fen:?}")]
    InvalidFen { fen: String },
}
