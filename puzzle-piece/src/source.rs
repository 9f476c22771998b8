//! Interfaces the embedding application implements.

use crate::matrix::PieceMatrix;
use crate::model::{ImageSource, PieceIndex};
use crate::pool::TileId;

/// Queried synchronously on every refresh.
pub trait PuzzleDataSource {
    fn matrix_value(&self) -> PieceMatrix;

    /// Diameter of the tab/notch arcs, in the container's units.
    fn hump_width(&self) -> f32;

    fn puzzle_image(&self) -> ImageSource;

    /// Currently discovered pieces, 1-based and row-major.
    fn discovered_pieces(&self) -> Vec<PieceIndex>;

    fn undiscovered_cover_image(&self, index: PieceIndex) -> Option<ImageSource>;
}

pub trait PuzzleDelegate {
    /// Fired at most once per placeholder tile activation.
    fn piece_did_tap(&mut self, tile: TileId, index: PieceIndex);
}

/// Which image slot an asynchronous load belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageTarget {
    Puzzle,
    Cover(PieceIndex),
}

/// Fire-and-forget url resolution. Implementations report back through
/// [`crate::view::PuzzleView::image_loaded`] on the same thread.
pub trait ImageLoader {
    fn load(&mut self, url: &str, target: ImageTarget);
}
