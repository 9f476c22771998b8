//! The puzzle widget: pulls shape, image and progress from a data source,
//! keeps the reveal mask and placeholder tiles in step with it, and reports
//! taps on undiscovered pieces to a delegate.

use serde::Serialize;

use crate::algorithms::grid_lines::build_grid_lines;
use crate::algorithms::picking::{hit_revealed, piece_at, piece_frame};
use crate::algorithms::piece_path::{cell_size, piece_geometry, trace_piece};
use crate::config::ViewConfig;
use crate::error::PuzzleError;
use crate::geometry::limits::sanitize_hump;
use crate::layers::{ImageLayers, MaskLayer, OutlineLayer};
use crate::matrix::SignMatrices;
use crate::model::{ImageHandle, ImageSlot, PieceIndex, Size, Vec2};
use crate::pool::{PlaceholderTile, PlaceholderTilePool};
use crate::source::{ImageLoader, ImageTarget, PuzzleDataSource, PuzzleDelegate};
use crate::tracker::PieceStateTracker;

/// What a successful reload changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    /// Shape, hump width or container size changed and everything was rebuilt.
    pub rebuilt: bool,
    pub newly_revealed: Vec<PieceIndex>,
    pub tiles_acquired: usize,
    pub tiles_released: usize,
}

/// Everything a host needs to draw the widget, back to front: dimmed
/// background, foreground clipped by `mask`, `outline`, then `tiles`.
#[derive(Clone, Debug, Serialize)]
pub struct Scene {
    pub size: Size,
    pub rows: u32,
    pub cols: u32,
    pub hump: f32,
    pub background: ImageSlot,
    pub foreground: ImageSlot,
    pub dim_alpha: f32,
    pub mask: MaskLayer,
    pub outline: OutlineLayer,
    pub tiles: Vec<PlaceholderTile>,
}

pub struct PuzzleView {
    config: ViewConfig,
    size: Size,
    size_dirty: bool,
    built: bool,
    /// Cell size of the last build; picking uses it until the next rebuild.
    cell: Size,
    matrices: SignMatrices,
    hump: f32,
    tracker: PieceStateTracker,
    pool: PlaceholderTilePool,
    mask: MaskLayer,
    outline: OutlineLayer,
    images: ImageLayers,
    data_source: Option<Box<dyn PuzzleDataSource>>,
    delegate: Option<Box<dyn PuzzleDelegate>>,
    loader: Option<Box<dyn ImageLoader>>,
}

impl Default for PuzzleView {
    fn default() -> Self {
        PuzzleView::new(ViewConfig::default())
    }
}

impl PuzzleView {
    pub fn new(config: ViewConfig) -> Self {
        let config = config.sanitized();
        PuzzleView {
            size: Size::default(),
            size_dirty: false,
            built: false,
            cell: Size::default(),
            matrices: SignMatrices::default(),
            hump: 0.0,
            tracker: PieceStateTracker::new(),
            pool: PlaceholderTilePool::new(),
            mask: MaskLayer::new(),
            outline: OutlineLayer::new(config.line_color, config.line_width),
            images: ImageLayers::new(config.dim_alpha),
            data_source: None,
            delegate: None,
            loader: None,
            config,
        }
    }

    pub fn set_data_source(&mut self, source: Box<dyn PuzzleDataSource>) {
        self.data_source = Some(source);
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn PuzzleDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn set_image_loader(&mut self, loader: Box<dyn ImageLoader>) {
        self.loader = Some(loader);
    }

    /// Layout. A new size invalidates all geometry; it is rebuilt on the
    /// next reload.
    pub fn set_size(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.size_dirty = true;
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Cell size the current scene was built with. Before the first build
    /// it follows the requested size.
    pub fn cell(&self) -> Result<Size, PuzzleError> {
        if self.built {
            Ok(self.cell)
        } else {
            cell_size(self.size, &self.matrices)
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn matrices(&self) -> &SignMatrices {
        &self.matrices
    }

    pub fn hump(&self) -> f32 {
        self.hump
    }

    pub fn tracker(&self) -> &PieceStateTracker {
        &self.tracker
    }

    pub fn pool(&self) -> &PlaceholderTilePool {
        &self.pool
    }

    pub fn mask(&self) -> &MaskLayer {
        &self.mask
    }

    pub fn outline(&self) -> &OutlineLayer {
        &self.outline
    }

    pub fn images(&self) -> &ImageLayers {
        &self.images
    }

    /// Pulls fresh values from the data source and brings the layers and
    /// tiles in line with them.
    ///
    /// All geometry is computed before anything is modified, so on error the
    /// previous scene is left exactly as it was. Without a data source this
    /// is a no-op.
    pub fn reload(&mut self) -> Result<RefreshOutcome, PuzzleError> {
        let Some(source) = self.data_source.as_deref() else {
            return Ok(RefreshOutcome::default());
        };
        let matrices = source.matrix_value().resolve();
        let hump = sanitize_hump(source.hump_width());
        let discovered = source.discovered_pieces();

        let reset = !self.built || self.size_dirty || matrices != self.matrices || hump != self.hump;
        let cell = cell_size(self.size, &matrices)?;
        let total = matrices.piece_count();

        let outline = if reset { Some(build_grid_lines(&matrices, cell, hump)?) } else { None };
        let empty = PieceStateTracker::new();
        let base = if reset { &empty } else { &self.tracker };
        let plan = base.plan(&discovered, total)?;
        let staged = plan
            .newly_revealed
            .iter()
            .map(|i| piece_geometry(*i, &matrices, cell).map(|geo| (geo, trace_piece(&geo, hump))))
            .collect::<Result<Vec<_>, _>>()?;
        let frames = plan
            .covered
            .iter()
            .map(|i| piece_frame(*i, &matrices, cell).map(|f| (*i, f)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut outcome = RefreshOutcome { rebuilt: reset, ..Default::default() };

        if reset {
            self.tracker.reset();
            self.mask.clear();
            outcome.tiles_released += self.pool.release_all();
            self.matrices = matrices;
            self.hump = hump;
            self.cell = cell;
            self.built = true;
            self.size_dirty = false;
            if let Some(path) = outline {
                self.outline.set_path(path);
            }
        }

        if let Some(url) = self.images.assign(&source.puzzle_image()) {
            if let Some(loader) = self.loader.as_mut() {
                loader.load(&url, ImageTarget::Puzzle);
            }
        }

        for (geo, path) in staged {
            let [top, right, bottom, left] = geo.signs;
            tracing::debug!(index = geo.index, top, right, bottom, left, "piece revealed");
            self.mask.push(geo.index, path);
            self.tracker.mark_revealed(geo.index);
            outcome.newly_revealed.push(geo.index);
        }

        for index in &plan.uncovered {
            if self.pool.release(*index) {
                outcome.tiles_released += 1;
            }
        }
        self.pool.reset_taps();
        for (index, frame) in frames {
            let (_, newly_bound) = self.pool.acquire(index, frame);
            if newly_bound {
                outcome.tiles_acquired += 1;
            }
            let fetch = self.pool.assign_cover(index, source.undiscovered_cover_image(index));
            if let (Some(url), Some(loader)) = (fetch, self.loader.as_mut()) {
                loader.load(&url, ImageTarget::Cover(index));
            }
        }

        Ok(outcome)
    }

    /// `reload` that logs failures instead of returning them.
    pub fn safe_reload(&mut self) -> Option<RefreshOutcome> {
        match self.reload() {
            Ok(outcome) => Some(outcome),
            Err(error) => {
                tracing::warn!(%error, code = error.code(), "puzzle reload failed");
                None
            }
        }
    }

    /// Taps the placeholder over `index`. Returns whether the delegate was
    /// notified.
    pub fn tap(&mut self, index: PieceIndex) -> bool {
        let Some(event) = self.pool.tap(index) else {
            return false;
        };
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.piece_did_tap(event.tile, event.index);
        }
        true
    }

    /// Taps whatever placeholder covers the point `p`.
    pub fn tap_at(&mut self, p: Vec2) -> bool {
        match self.piece_at(p) {
            Some(index) => self.tap(index),
            None => false,
        }
    }

    /// Grid cell under `p`, ignoring humps.
    pub fn piece_at(&self, p: Vec2) -> Option<PieceIndex> {
        if !self.built {
            return None;
        }
        piece_at(p, &self.matrices, self.cell)
    }

    /// Revealed piece whose outline, humps included, contains `p`.
    pub fn revealed_piece_at(&self, p: Vec2) -> Option<PieceIndex> {
        hit_revealed(p, &self.mask, self.config.flatten_tolerance)
    }

    /// Completion callback for an [`ImageLoader`]. Stale completions (the
    /// slot moved on to another url) are ignored.
    pub fn image_loaded(&mut self, target: ImageTarget, url: &str, handle: ImageHandle) -> bool {
        match target {
            ImageTarget::Puzzle => self.images.loaded(url, handle),
            ImageTarget::Cover(index) => {
                let waiting = matches!(
                    self.pool.tile_for(index).map(|t| &t.cover),
                    Some(ImageSlot::Loading { url: want }) if want == url
                );
                waiting && self.pool.set_cover(index, ImageSlot::Ready { handle })
            }
        }
    }

    pub fn scene(&self) -> Scene {
        Scene {
            size: self.size,
            rows: self.matrices.rows(),
            cols: self.matrices.cols(),
            hump: self.hump,
            background: self.images.background.clone(),
            foreground: self.images.foreground.clone(),
            dim_alpha: self.images.dim_alpha,
            mask: self.mask.clone(),
            outline: self.outline.clone(),
            tiles: self.pool.active().into_iter().cloned().collect(),
        }
    }
}
