//! End-to-end refresh behaviour of `PuzzleView` against an in-memory data
//! source.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use puzzle_piece::json::to_json_impl;
use puzzle_piece::{
    ImageHandle, ImageLoader, ImageSlot, ImageSource, ImageTarget, PieceIndex, PieceMatrix, PuzzleDataSource,
    PuzzleDelegate, PuzzleError, PuzzleView, Size, TileId, TileState, Vec2, ViewConfig,
};

struct State {
    matrix: PieceMatrix,
    hump: f32,
    image: ImageSource,
    discovered: Vec<PieceIndex>,
    covers: HashMap<PieceIndex, ImageSource>,
}

#[derive(Clone)]
struct Source(Rc<RefCell<State>>);

impl PuzzleDataSource for Source {
    fn matrix_value(&self) -> PieceMatrix {
        self.0.borrow().matrix.clone()
    }
    fn hump_width(&self) -> f32 {
        self.0.borrow().hump
    }
    fn puzzle_image(&self) -> ImageSource {
        self.0.borrow().image.clone()
    }
    fn discovered_pieces(&self) -> Vec<PieceIndex> {
        self.0.borrow().discovered.clone()
    }
    fn undiscovered_cover_image(&self, index: PieceIndex) -> Option<ImageSource> {
        self.0.borrow().covers.get(&index).cloned()
    }
}

struct Taps(Rc<RefCell<Vec<(TileId, PieceIndex)>>>);

impl PuzzleDelegate for Taps {
    fn piece_did_tap(&mut self, tile: TileId, index: PieceIndex) {
        self.0.borrow_mut().push((tile, index));
    }
}

struct Loads(Rc<RefCell<Vec<(String, ImageTarget)>>>);

impl ImageLoader for Loads {
    fn load(&mut self, url: &str, target: ImageTarget) {
        self.0.borrow_mut().push((url.to_string(), target));
    }
}

struct Harness {
    view: PuzzleView,
    state: Rc<RefCell<State>>,
    taps: Rc<RefCell<Vec<(TileId, PieceIndex)>>>,
    loads: Rc<RefCell<Vec<(String, ImageTarget)>>>,
}

fn harness(matrix: PieceMatrix, hump: f32, discovered: &[PieceIndex]) -> Harness {
    let state = Rc::new(RefCell::new(State {
        matrix,
        hump,
        image: ImageSource::Image(Some(ImageHandle(1))),
        discovered: discovered.to_vec(),
        covers: HashMap::new(),
    }));
    let taps = Rc::new(RefCell::new(Vec::new()));
    let loads = Rc::new(RefCell::new(Vec::new()));
    let mut view = PuzzleView::new(ViewConfig::default());
    view.set_data_source(Box::new(Source(state.clone())));
    view.set_delegate(Box::new(Taps(taps.clone())));
    view.set_image_loader(Box::new(Loads(loads.clone())));
    view.set_size(Size::new(300.0, 300.0));
    Harness { view, state, taps, loads }
}

#[test]
fn three_by_three_reveal_tap_and_refresh() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[1, 3]);
    let out = h.view.reload().unwrap();
    assert!(out.rebuilt);
    assert_eq!(out.newly_revealed, vec![1, 3]);
    assert_eq!(out.tiles_acquired, 7);
    assert_eq!(h.view.pool().bound_indices(), vec![2, 4, 5, 6, 7, 8, 9]);
    assert_eq!(h.view.mask().indices(), vec![1, 3]);
    assert_eq!(h.view.outline().path.subpath_count(), 4);

    let tile5 = h.view.pool().tile_for(5).unwrap().id;
    assert!(h.view.tap(5));
    assert!(!h.view.tap(5));
    assert_eq!(*h.taps.borrow(), vec![(tile5, 5)]);

    let before = h.view.mask().entries().to_vec();
    let version = h.view.mask().version();
    h.state.borrow_mut().discovered = vec![1, 3, 5];
    let out = h.view.reload().unwrap();
    assert!(!out.rebuilt);
    assert_eq!(out.newly_revealed, vec![5]);
    assert_eq!(out.tiles_released, 1);
    assert_eq!(out.tiles_acquired, 0);
    assert_eq!(h.view.mask().indices(), vec![1, 3, 5]);
    assert_eq!(h.view.mask().version(), version + 1);
    // masks for 1 and 3 are the same objects as before
    assert_eq!(&h.view.mask().entries()[..2], &before[..]);
    assert!(h.view.pool().tile_for(5).is_none());
    assert_eq!(h.view.pool().bound_indices(), vec![2, 4, 6, 7, 8, 9]);
}

#[test]
fn refresh_is_idempotent() {
    let mut h = harness(PieceMatrix::Grid3x4, 12.0, &[2, 7, 11]);
    h.view.reload().unwrap();
    let version = h.view.mask().version();
    let outline = h.view.outline().version();
    let out = h.view.reload().unwrap();
    assert!(!out.rebuilt);
    assert!(out.newly_revealed.is_empty());
    assert_eq!((out.tiles_acquired, out.tiles_released), (0, 0));
    assert_eq!(h.view.mask().version(), version);
    assert_eq!(h.view.outline().version(), outline);
    assert_eq!(h.view.pool().active_count(), 9);
    assert_eq!(h.view.pool().capacity(), 9);
}

#[test]
fn duplicate_indices_reveal_once() {
    let mut h = harness(PieceMatrix::Grid2x2, 10.0, &[4, 4, 2, 4]);
    let out = h.view.reload().unwrap();
    assert_eq!(out.newly_revealed, vec![4, 2]);
    assert_eq!(h.view.mask().len(), 2);
    assert_eq!(h.view.pool().bound_indices(), vec![1, 3]);
}

#[test]
fn reload_before_layout_is_unset_size() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[1]);
    h.view.set_size(Size::new(0.0, 300.0));
    assert_eq!(h.view.reload(), Err(PuzzleError::UnsetSize));
    assert!(h.view.safe_reload().is_none());
    assert!(h.view.mask().is_empty());
    assert_eq!(h.view.pool().active_count(), 0);

    h.view.set_size(Size::new(300.0, 300.0));
    assert!(h.view.safe_reload().is_some());
    assert_eq!(h.view.mask().len(), 1);
}

#[test]
fn bad_index_leaves_scene_untouched() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[1, 3]);
    h.view.reload().unwrap();
    h.view.tap(6);
    let version = h.view.mask().version();
    h.state.borrow_mut().discovered = vec![1, 3, 5, 10];
    assert_eq!(h.view.reload(), Err(PuzzleError::NotFoundPiece { index: 10, total: 9 }));
    assert_eq!(h.view.mask().version(), version);
    assert_eq!(h.view.mask().indices(), vec![1, 3]);
    assert_eq!(h.view.tracker().revealed().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(h.view.pool().bound_indices(), vec![2, 4, 5, 6, 7, 8, 9]);
    assert_eq!(h.view.pool().tile_for(6).unwrap().state, TileState::Tapped);

    h.state.borrow_mut().discovered = vec![0];
    assert_eq!(h.view.reload(), Err(PuzzleError::NotFoundPiece { index: 0, total: 9 }));
}

#[test]
fn shape_change_rebuilds_everything() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[1, 3]);
    h.view.reload().unwrap();
    let outline = h.view.outline().version();
    {
        let mut s = h.state.borrow_mut();
        s.matrix = PieceMatrix::Grid2x2;
        s.discovered = vec![1];
    }
    let out = h.view.reload().unwrap();
    assert!(out.rebuilt);
    assert_eq!(out.newly_revealed, vec![1]);
    assert_eq!(h.view.mask().indices(), vec![1]);
    assert_eq!(h.view.pool().bound_indices(), vec![2, 3, 4]);
    assert_eq!(h.view.tracker().revealed_count(), 1);
    assert_eq!(h.view.outline().version(), outline + 1);
    assert_eq!((h.view.matrices().rows(), h.view.matrices().cols()), (2, 2));
    // old tiles were recycled, not leaked
    assert_eq!(h.view.pool().capacity(), 7);
    assert_eq!(h.view.pool().free_count(), 4);
}

#[test]
fn hump_or_size_change_replays_revealed_list() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[2, 5]);
    h.view.reload().unwrap();
    h.state.borrow_mut().hump = 30.0;
    let out = h.view.reload().unwrap();
    assert!(out.rebuilt);
    assert_eq!(out.newly_revealed, vec![2, 5]);
    assert_eq!(h.view.hump(), 30.0);

    h.view.set_size(Size::new(600.0, 450.0));
    let out = h.view.reload().unwrap();
    assert!(out.rebuilt);
    assert_eq!(h.view.pool().tile_for(9).unwrap().frame.x, 400.0);
    assert_eq!(h.view.pool().tile_for(9).unwrap().frame.height, 150.0);
}

#[test]
fn shrinking_list_recovers_tile_but_keeps_mask() {
    let mut h = harness(PieceMatrix::Grid2x2, 10.0, &[1, 2]);
    h.view.reload().unwrap();
    h.state.borrow_mut().discovered = vec![1];
    let out = h.view.reload().unwrap();
    assert_eq!(out.tiles_acquired, 1);
    assert_eq!(h.view.pool().bound_indices(), vec![2, 3, 4]);
    assert_eq!(h.view.mask().indices(), vec![1, 2]);
}

#[test]
fn refresh_rearms_tapped_tiles() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[]);
    h.view.reload().unwrap();
    assert!(h.view.tap(4));
    assert!(h.view.tap(5));
    // tapping 5 re-armed 4
    assert_eq!(h.view.pool().tile_for(4).unwrap().state, TileState::Untapped);
    assert_eq!(h.view.pool().tile_for(5).unwrap().state, TileState::Tapped);
    h.view.reload().unwrap();
    assert!(h.view.tap(5));
    let seen: Vec<PieceIndex> = h.taps.borrow().iter().map(|(_, i)| *i).collect();
    assert_eq!(seen, vec![4, 5, 5]);
}

#[test]
fn tap_at_picks_the_cell() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[1, 5]);
    h.view.reload().unwrap();
    assert!(!h.view.tap_at(Vec2::new(10.0, 10.0)));
    assert!(h.view.tap_at(Vec2::new(250.0, 150.0)));
    assert!(!h.view.tap_at(Vec2::new(350.0, 150.0)));
    assert_eq!(h.taps.borrow().last().map(|(_, i)| *i), Some(6));
    // top tab of piece 5 pokes into cell 2
    assert_eq!(h.view.piece_at(Vec2::new(150.0, 95.0)), Some(2));
    assert_eq!(h.view.revealed_piece_at(Vec2::new(150.0, 95.0)), Some(5));
    assert_eq!(h.view.revealed_piece_at(Vec2::new(250.0, 250.0)), None);
}

#[test]
fn url_images_load_once_and_ignore_stale_completions() {
    let mut h = harness(PieceMatrix::Grid2x2, 10.0, &[1]);
    {
        let mut s = h.state.borrow_mut();
        s.image = ImageSource::Url("https://img/puzzle.png".into());
        s.covers.insert(2, ImageSource::Url("https://img/cover-2.png".into()));
        s.covers.insert(3, ImageSource::Image(Some(ImageHandle(33))));
    }
    h.view.reload().unwrap();
    assert_eq!(
        *h.loads.borrow(),
        vec![
            ("https://img/puzzle.png".to_string(), ImageTarget::Puzzle),
            ("https://img/cover-2.png".to_string(), ImageTarget::Cover(2)),
        ]
    );
    assert!(matches!(h.view.images().foreground, ImageSlot::Loading { .. }));
    assert_eq!(h.view.pool().tile_for(3).unwrap().cover, ImageSlot::Ready { handle: ImageHandle(33) });
    assert_eq!(h.view.pool().tile_for(4).unwrap().cover, ImageSlot::Empty);

    assert!(!h.view.image_loaded(ImageTarget::Puzzle, "https://img/old.png", ImageHandle(9)));
    assert!(h.view.image_loaded(ImageTarget::Puzzle, "https://img/puzzle.png", ImageHandle(10)));
    assert_eq!(h.view.images().background, ImageSlot::Ready { handle: ImageHandle(10) });
    assert!(h.view.image_loaded(ImageTarget::Cover(2), "https://img/cover-2.png", ImageHandle(11)));
    assert!(!h.view.image_loaded(ImageTarget::Cover(4), "https://img/cover-2.png", ImageHandle(11)));

    h.view.reload().unwrap();
    assert_eq!(h.loads.borrow().len(), 2);
}

#[test]
fn covers_follow_the_source_between_refreshes() {
    let mut h = harness(PieceMatrix::Grid2x2, 10.0, &[1]);
    h.state.borrow_mut().covers.insert(2, ImageSource::Image(Some(ImageHandle(1))));
    h.view.reload().unwrap();
    assert_eq!(h.view.pool().tile_for(2).unwrap().cover, ImageSlot::Ready { handle: ImageHandle(1) });
    let tile = h.view.pool().tile_for(2).unwrap().id;

    h.state.borrow_mut().covers.insert(2, ImageSource::Image(Some(ImageHandle(2))));
    let out = h.view.reload().unwrap();
    assert_eq!(out.tiles_acquired, 0);
    assert_eq!(h.view.pool().tile_for(2).unwrap().id, tile);
    assert_eq!(h.view.pool().tile_for(2).unwrap().cover, ImageSlot::Ready { handle: ImageHandle(2) });

    // url covers load once per distinct url
    h.state.borrow_mut().covers.insert(2, ImageSource::Url("https://img/new-2.png".into()));
    h.view.reload().unwrap();
    h.view.reload().unwrap();
    assert_eq!(*h.loads.borrow(), vec![("https://img/new-2.png".to_string(), ImageTarget::Cover(2))]);
    assert!(h.view.image_loaded(ImageTarget::Cover(2), "https://img/new-2.png", ImageHandle(3)));
    h.view.reload().unwrap();
    assert_eq!(h.view.pool().tile_for(2).unwrap().cover, ImageSlot::Ready { handle: ImageHandle(3) });
    assert_eq!(h.loads.borrow().len(), 1);

    h.state.borrow_mut().covers.remove(&2);
    h.view.reload().unwrap();
    assert_eq!(h.view.pool().tile_for(2).unwrap().cover, ImageSlot::Empty);
}

#[test]
fn unusable_hump_draws_straight_edges() {
    let mut h = harness(PieceMatrix::Grid3x3, f32::NAN, &[5]);
    assert!(h.view.reload().unwrap().rebuilt);
    assert_eq!(h.view.hump(), 0.0);
    let version = h.view.mask().version();
    let out = h.view.reload().unwrap();
    assert!(!out.rebuilt);
    assert_eq!((out.tiles_acquired, out.tiles_released), (0, 0));
    assert_eq!(h.view.mask().version(), version);
    let d = puzzle_piece::svg::to_svg_path(&h.view.mask().entries()[0].path);
    assert!(!d.contains("NaN"));
    assert_eq!(h.view.mask().entries()[0].path.arc_count(), 0);
    assert_eq!(h.view.outline().path.arc_count(), 0);

    h.state.borrow_mut().hump = -4.0;
    assert!(!h.view.reload().unwrap().rebuilt);
    h.state.borrow_mut().hump = f32::INFINITY;
    assert!(!h.view.reload().unwrap().rebuilt);
}

#[test]
fn picking_uses_the_built_grid_until_the_next_reload() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[]);
    h.view.reload().unwrap();
    h.view.set_size(Size::new(600.0, 600.0));
    assert_eq!(h.view.cell(), Ok(Size::new(100.0, 100.0)));
    assert_eq!(h.view.piece_at(Vec2::new(250.0, 150.0)), Some(6));
    assert_eq!(h.view.piece_at(Vec2::new(450.0, 450.0)), None);
    assert!(h.view.tap_at(Vec2::new(250.0, 150.0)));
    assert_eq!(h.taps.borrow().last().map(|(_, i)| *i), Some(6));

    h.view.reload().unwrap();
    assert_eq!(h.view.cell(), Ok(Size::new(200.0, 200.0)));
    assert_eq!(h.view.piece_at(Vec2::new(250.0, 150.0)), Some(2));
    assert_eq!(h.view.piece_at(Vec2::new(450.0, 450.0)), Some(9));
}

#[test]
fn no_data_source_is_a_no_op() {
    let mut view = PuzzleView::default();
    view.set_size(Size::new(10.0, 10.0));
    let out = view.reload().unwrap();
    assert!(!out.rebuilt);
    assert!(view.mask().is_empty());
    assert!(!view.tap(1));
}

#[test]
fn scene_and_document_follow_the_view() {
    let mut h = harness(PieceMatrix::Grid3x3, 20.0, &[1, 3]);
    h.view.reload().unwrap();
    h.view.tap(2);
    let scene = h.view.scene();
    assert_eq!((scene.rows, scene.cols), (3, 3));
    assert_eq!(scene.tiles.len(), 7);
    assert_eq!(scene.mask.len(), 2);

    let doc = to_json_impl(&h.view);
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["grid"]["rows"], 3);
    assert_eq!(doc["revealed"], serde_json::json!([1, 3]));
    assert_eq!(doc["mask"].as_array().unwrap().len(), 2);
    assert!(doc["mask"][0]["d"].as_str().unwrap().starts_with("M 0 0"));
    assert_eq!(doc["tiles"][0]["index"], 2);
    assert_eq!(doc["tiles"][0]["tapped"], true);
    assert_eq!(doc["config"]["line_width"], 0.5);
}
