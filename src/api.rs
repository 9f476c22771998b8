use crate::feed::{self, FeedError, JsDelegate, JsFeed, JsLoader};
use crate::interop::{arr_str, arr_u32, warn};
use crate::{error, PuzzleView};
use js_sys::Function;
use puzzle_piece::algorithms::piece_path::{piece_geometry, trace_piece};
use puzzle_piece::algorithms::picking::piece_frame;
use puzzle_piece::geometry::limits;
use puzzle_piece::json::to_json_impl;
use puzzle_piece::svg::{mask_to_svg_paths, to_svg_path};
use puzzle_piece::{ImageHandle, PieceIndex, PuzzleError, Rect, RefreshOutcome, Size, Vec2, ViewConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct PieceInfo {
    index: PieceIndex,
    row: u32,
    col: u32,
    frame: Rect,
    /// top, right, bottom, left
    signs: [i32; 4],
    d: String,
}

fn feed_error(e: FeedError) -> JsValue {
    match e {
        FeedError::Bad { method, message } => error::bad_data_source(method, message),
        FeedError::NonFinite(param) => error::non_finite(param),
        FeedError::OutOfRange { param, min, max, got } => error::out_of_range(param, min, max, got),
    }
}

fn to_js<T: Serialize>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

impl PuzzleView {
    /// Pulls a snapshot from the JS feed and reloads the core view with it.
    fn pull_and_reload(&self) -> Result<RefreshOutcome, JsValue> {
        let feed = self.feed.borrow().clone().ok_or_else(error::no_data_source)?;
        let snapshot = feed.snapshot().map_err(feed_error)?;
        let result = {
            let mut view = self.inner.borrow_mut();
            view.set_data_source(Box::new(snapshot));
            view.reload().map_err(|e| error::puzzle(&e))
        };
        self.flush();
        result
    }

    fn tap_index(&self, index: Option<PieceIndex>) -> bool {
        let accepted = match index {
            Some(i) => self.inner.borrow_mut().tap(i),
            None => false,
        };
        self.flush();
        accepted
    }

    /// Hands queued taps and loads to their JS callbacks. Callers must not
    /// hold a borrow of `inner`.
    fn flush(&self) {
        let taps = self.outbox.take_taps();
        let on_tap = self.on_tap.borrow().clone();
        if let Some(f) = on_tap {
            for event in taps {
                feed::call_tap(&f, event);
            }
        }
        let loads = self.outbox.take_loads();
        let on_load = self.on_load.borrow().clone();
        if let Some(f) = on_load {
            for (url, target) in loads {
                feed::call_load(&f, &url, target);
            }
        }
    }

    fn piece_info(&self, index: PieceIndex) -> Result<PieceInfo, PuzzleError> {
        let view = self.inner.borrow();
        let cell = view.cell()?;
        let m = view.matrices();
        let geo = piece_geometry(index, m, cell)?;
        Ok(PieceInfo {
            index,
            row: geo.row,
            col: geo.col,
            frame: piece_frame(index, m, cell)?,
            signs: geo.signs,
            d: to_svg_path(&trace_piece(&geo, view.hump())),
        })
    }
}

#[wasm_bindgen]
impl PuzzleView {
    /// `config` is an optional JSON string; unknown or bad input falls back
    /// to the defaults with a console warning.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> PuzzleView {
        let cfg = match config.as_deref().map(ViewConfig::from_json) {
            None => ViewConfig::default(),
            Some(Ok(c)) => c,
            Some(Err(e)) => {
                warn(&format!("puzzle: bad config, using defaults: {}", e));
                ViewConfig::default()
            }
        };
        crate::PuzzleView::rs_new(cfg)
    }

    /// Object with `matrixValue()`, `humpWidth()`, `puzzleImage()`,
    /// `discoveredPieces()` and `undiscoveredCoverImage(n)`.
    #[wasm_bindgen(js_name = setDataSource)]
    pub fn set_data_source(&self, source: JsValue) {
        *self.feed.borrow_mut() = Some(JsFeed::new(source));
    }

    /// `fn(tileId, pieceIndex)`, called once per accepted tap. It runs after
    /// the tap has been applied and may call back into the view.
    #[wasm_bindgen(js_name = setDelegate)]
    pub fn set_delegate(&self, f: Function) {
        *self.on_tap.borrow_mut() = Some(f);
        self.inner.borrow_mut().set_delegate(Box::new(JsDelegate::new(self.outbox.clone())));
    }

    /// `fn(url, target)` where target is 0 for the puzzle image or the piece
    /// number of a cover. Report completion with `imageLoaded`, which may be
    /// called from inside the callback.
    #[wasm_bindgen(js_name = setImageLoader)]
    pub fn set_image_loader(&self, f: Function) {
        *self.on_load.borrow_mut() = Some(f);
        self.inner.borrow_mut().set_image_loader(Box::new(JsLoader::new(self.outbox.clone())));
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&self, width: f32, height: f32) -> bool {
        if !limits::in_size_bounds(width) || !limits::in_size_bounds(height) {
            return false;
        }
        self.inner.borrow_mut().set_size(Size::new(width, height));
        true
    }
    #[wasm_bindgen(js_name = setSizeRes)]
    pub fn set_size_res(&self, width: f32, height: f32) -> JsValue {
        if !width.is_finite() { return error::non_finite("width"); }
        if !height.is_finite() { return error::non_finite("height"); }
        if !limits::in_size_bounds(width) { return error::out_of_range("width", 0.0, limits::COORD_MAX, width); }
        if !limits::in_size_bounds(height) { return error::out_of_range("height", 0.0, limits::COORD_MAX, height); }
        self.inner.borrow_mut().set_size(Size::new(width, height));
        error::ok(JsValue::from_bool(true))
    }

    /// Refresh from the data source. Failures are logged to the console and
    /// leave the previous scene in place.
    pub fn reload(&self) -> bool {
        match self.pull_and_reload() {
            Ok(_) => true,
            Err(e) => {
                web_sys::console::warn_2(&JsValue::from_str("puzzle: reload failed"), &e);
                false
            }
        }
    }
    #[wasm_bindgen(js_name = reloadRes)]
    pub fn reload_res(&self) -> JsValue {
        match self.pull_and_reload() {
            Ok(outcome) => error::ok(to_js(&outcome)),
            Err(e) => e,
        }
    }

    pub fn tap(&self, index: u32) -> bool {
        self.tap_index(Some(index))
    }
    #[wasm_bindgen(js_name = tapAt)]
    pub fn tap_at(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.tap_index(self.piece_at(x, y))
    }
    #[wasm_bindgen(js_name = tapAtRes)]
    pub fn tap_at_res(&self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() { return error::non_finite("x"); }
        if !y.is_finite() { return error::non_finite("y"); }
        error::ok(JsValue::from_bool(self.tap_index(self.piece_at(x, y))))
    }

    /// Grid cell under a point, ignoring humps; `undefined` outside the grid.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, x: f32, y: f32) -> Option<u32> {
        self.inner.borrow().piece_at(Vec2::new(x, y))
    }
    #[wasm_bindgen(js_name = revealedPieceAt)]
    pub fn revealed_piece_at(&self, x: f32, y: f32) -> Option<u32> {
        self.inner.borrow().revealed_piece_at(Vec2::new(x, y))
    }

    /// Completion for a load started through the image loader.
    #[wasm_bindgen(js_name = imageLoaded)]
    pub fn image_loaded(&self, target: u32, url: &str, handle: f64) -> bool {
        if !handle.is_finite() || handle < 0.0 {
            return false;
        }
        self.inner.borrow_mut().image_loaded(feed::target_from_code(target), url, ImageHandle(handle as u64))
    }

    #[wasm_bindgen(js_name = pieceCount)]
    pub fn piece_count(&self) -> u32 {
        self.inner.borrow().matrices().piece_count()
    }
    pub fn revealed(&self) -> js_sys::Uint32Array {
        let ids: Vec<u32> = self.inner.borrow().tracker().revealed().collect();
        arr_u32(&ids)
    }
    #[wasm_bindgen(js_name = tileIndices)]
    pub fn tile_indices(&self) -> js_sys::Uint32Array {
        arr_u32(&self.inner.borrow().pool().bound_indices())
    }
    #[wasm_bindgen(js_name = maskVersion)]
    pub fn mask_version(&self) -> u64 {
        self.inner.borrow().mask().version()
    }

    /// Full render snapshot as a plain JS object.
    pub fn scene(&self) -> JsValue {
        to_js(&self.inner.borrow().scene())
    }
    /// Render document with SVG path strings, as JSON text.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> String {
        to_json_impl(&self.inner.borrow()).to_string()
    }
    #[wasm_bindgen(js_name = maskSvg)]
    pub fn mask_svg(&self) -> js_sys::Array {
        arr_str(&mask_to_svg_paths(self.inner.borrow().mask()))
    }
    #[wasm_bindgen(js_name = outlineSvg)]
    pub fn outline_svg(&self) -> String {
        to_svg_path(&self.inner.borrow().outline().path)
    }

    /// SVG path of any piece in the current grid, revealed or not.
    #[wasm_bindgen(js_name = pieceSvg)]
    pub fn piece_svg(&self, index: u32) -> Option<String> {
        self.piece_info(index).ok().map(|p| p.d)
    }
    #[wasm_bindgen(js_name = pieceSvgRes)]
    pub fn piece_svg_res(&self, index: u32) -> JsValue {
        match self.piece_info(index) {
            Ok(p) => error::ok(JsValue::from_str(&p.d)),
            Err(e) => error::puzzle(&e),
        }
    }
    #[wasm_bindgen(js_name = pieceInfoRes)]
    pub fn piece_info_res(&self, index: u32) -> JsValue {
        match self.piece_info(index) {
            Ok(p) => error::ok(to_js(&p)),
            Err(e) => error::puzzle(&e),
        }
    }
}
