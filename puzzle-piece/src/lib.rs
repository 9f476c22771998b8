pub mod model;
pub mod error;
pub mod config;
pub mod matrix;
pub mod layers;
pub mod tracker;
pub mod pool;
pub mod source;
pub mod view;
pub mod geometry {
    pub mod builder;
    pub mod flatten;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod grid_lines;
    pub mod picking;
    pub mod piece_path;
    pub mod tie_line;
    pub mod winding;
}
pub mod json;
pub mod svg;

pub use config::ViewConfig;
pub use error::PuzzleError;
pub use matrix::{PieceMatrix, SignMatrices};
pub use model::{EdgeDirection, ImageHandle, ImageSlot, ImageSource, Path, PathCommand, PieceIndex, Rect, Size, Vec2};
pub use pool::{PlaceholderTile, PlaceholderTilePool, TapEvent, TileId, TileState};
pub use source::{ImageLoader, ImageTarget, PuzzleDataSource, PuzzleDelegate};
pub use tracker::{PieceState, PieceStateTracker, RefreshPlan};
pub use view::{PuzzleView, RefreshOutcome, Scene};
