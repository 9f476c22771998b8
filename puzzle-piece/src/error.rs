//! Recoverable failures surfaced by geometry requests and refreshes.
//!
//! A traced edge whose endpoints share neither coordinate is not listed
//! here: it can only come from a malformed grid and panics in the edge
//! tracer instead.

use crate::model::PieceIndex;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The container has no area yet; lay it out before asking for geometry.
    #[error("puzzle container has zero size")]
    UnsetSize,

    /// Piece index outside `1..=total`, or a sign matrix too short to
    /// describe it.
    #[error("piece {index} not found (puzzle has {total} pieces)")]
    NotFoundPiece { index: PieceIndex, total: u32 },
}

impl PuzzleError {
    /// Stable machine-readable code, shared with the JS binding.
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleError::UnsetSize => "unset_size",
            PuzzleError::NotFoundPiece { .. } => "not_found_piece",
        }
    }
}
