//! One-hot board encoding used as the input of the neural evaluator.
//!
//! Every (square, color, piece) triple owns one input. Square a1 is 0 and h8
//! is 63; White comes before Black; pieces are ordered pawn, knight, bishop,
//! rook, queen, king. The index of a triple is
//! `square * 12 + color * 6 + piece`.

use chess::{Color, Piece, Square, NUM_COLORS, NUM_PIECES, NUM_SQUARES};

use crate::board::Position;

pub const FEATURE_COUNT: usize = NUM_SQUARES * NUM_COLORS * NUM_PIECES;

#[derive(Clone)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Indices of the inputs set to 1.
    pub fn active_features(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0.0)
            .map(|(index, _)| index)
    }
}

#[inline]
pub fn feature_index(square: Square, color: Color, piece: Piece) -> usize {
    square.to_index() * NUM_COLORS * NUM_PIECES + color.to_index() * NUM_PIECES + piece.to_index()
}

pub fn encode(position: &Position) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];

    for square in *position.board().combined() {
        if let Some((piece, color)) = position.piece_on(square) {
            features[feature_index(square, color, piece)] = 1.0;
        }
    }

    FeatureVector(features)
}
