//! Adapters from JS objects to the core's data source and delegate traits.
//!
//! The core queries its data source through infallible methods, so the
//! JS object is read once per reload into a [`Snapshot`] and validated
//! before the view sees it. Cover images of every undiscovered piece are
//! read into the snapshot too; a failing cover lookup is logged and treated
//! as "no cover".
//!
//! The core's delegate and loader only queue into an [`Outbox`]; the binding
//! drains it into the JS callbacks once the core view is released.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::interop::{call_method, describe, warn};
use js_sys::Function;
use puzzle_piece::geometry::limits;
use puzzle_piece::{
    ImageHandle, ImageLoader, ImageSource, ImageTarget, PieceIndex, PieceMatrix, PuzzleDataSource, PuzzleDelegate,
    TapEvent, TileId,
};
use wasm_bindgen::JsValue;

/// Why a snapshot could not be taken.
#[derive(Debug)]
pub enum FeedError {
    Bad { method: &'static str, message: String },
    NonFinite(&'static str),
    OutOfRange { param: &'static str, min: f32, max: f32, got: f32 },
}

#[derive(Clone)]
pub struct JsFeed {
    obj: JsValue,
}

pub struct Snapshot {
    matrix: PieceMatrix,
    hump: f32,
    image: ImageSource,
    discovered: Vec<PieceIndex>,
    covers: HashMap<PieceIndex, Option<ImageSource>>,
}

fn bad(method: &'static str, message: impl Into<String>) -> FeedError {
    FeedError::Bad { method, message: message.into() }
}

fn preset(name: &str) -> Option<PieceMatrix> {
    match name {
        "grid2x2" => Some(PieceMatrix::Grid2x2),
        "grid3x3" => Some(PieceMatrix::Grid3x3),
        "grid3x4" => Some(PieceMatrix::Grid3x4),
        "grid4x4" => Some(PieceMatrix::Grid4x4),
        _ => None,
    }
}

/// `"grid3x3"`-style preset names, or `{ kind: "custom", h_lines, v_lines }`.
pub fn parse_matrix(v: &JsValue) -> Result<PieceMatrix, FeedError> {
    const M: &str = "matrixValue";
    let matrix = match v.as_string() {
        Some(name) => preset(&name).ok_or_else(|| bad(M, format!("unknown preset '{}'", name)))?,
        None => serde_wasm_bindgen::from_value::<PieceMatrix>(v.clone()).map_err(|e| bad(M, e.to_string()))?,
    };
    if let PieceMatrix::Custom { h_lines, v_lines } = &matrix {
        let lines = h_lines.len().max(v_lines.len());
        if lines > limits::MAX_GRID_LINES {
            return Err(FeedError::OutOfRange {
                param: "matrixValue",
                min: 0.0,
                max: limits::MAX_GRID_LINES as f32,
                got: lines as f32,
            });
        }
    }
    Ok(matrix)
}

/// `null`/`undefined` for no image, a string url, or a numeric handle of an
/// image the host already decoded.
pub fn parse_image(v: &JsValue) -> Option<ImageSource> {
    if v.is_null() || v.is_undefined() {
        return Some(ImageSource::Image(None));
    }
    if let Some(url) = v.as_string() {
        return Some(ImageSource::Url(url));
    }
    match v.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Some(ImageSource::Image(Some(ImageHandle(n as u64)))),
        _ => None,
    }
}

impl JsFeed {
    pub fn new(obj: JsValue) -> JsFeed { JsFeed { obj } }

    pub fn snapshot(&self) -> Result<Snapshot, FeedError> {
        let call = |m: &'static str| call_method(&self.obj, m, &[]).map_err(|e| bad(m, e));

        let matrix = parse_matrix(&call("matrixValue")?)?;

        let hump = call("humpWidth")?.as_f64().ok_or_else(|| bad("humpWidth", "expected a number"))? as f32;
        if !hump.is_finite() {
            return Err(FeedError::NonFinite("humpWidth"));
        }
        if !limits::in_hump_bounds(hump) {
            return Err(FeedError::OutOfRange { param: "humpWidth", min: 0.0, max: limits::HUMP_MAX, got: hump });
        }

        let image = parse_image(&call("puzzleImage")?)
            .ok_or_else(|| bad("puzzleImage", "expected null, a url string or an image handle"))?;

        let discovered = serde_wasm_bindgen::from_value::<Vec<PieceIndex>>(call("discoveredPieces")?)
            .map_err(|e| bad("discoveredPieces", e.to_string()))?;

        let known: HashSet<PieceIndex> = discovered.iter().copied().collect();
        let covers = (1..=matrix.resolve().piece_count())
            .filter(|i| !known.contains(i))
            .map(|i| (i, self.cover(i)))
            .collect();

        Ok(Snapshot { matrix, hump, image, discovered, covers })
    }

    fn cover(&self, index: PieceIndex) -> Option<ImageSource> {
        let v = match call_method(&self.obj, "undiscoveredCoverImage", &[JsValue::from_f64(index as f64)]) {
            Ok(v) => v,
            Err(e) => {
                warn(&format!("puzzle: no cover for piece {}: {}", index, e));
                return None;
            }
        };
        let parsed = parse_image(&v);
        if parsed.is_none() {
            warn(&format!("puzzle: ignoring cover for piece {}: {}", index, describe(&v)));
        }
        parsed
    }
}

impl PuzzleDataSource for Snapshot {
    fn matrix_value(&self) -> PieceMatrix { self.matrix.clone() }
    fn hump_width(&self) -> f32 { self.hump }
    fn puzzle_image(&self) -> ImageSource { self.image.clone() }
    fn discovered_pieces(&self) -> Vec<PieceIndex> { self.discovered.clone() }

    fn undiscovered_cover_image(&self, index: PieceIndex) -> Option<ImageSource> {
        self.covers.get(&index).cloned().flatten()
    }
}

/// Taps and url loads the core asked for, waiting for their JS callbacks.
#[derive(Clone, Default)]
pub struct Outbox {
    taps: Rc<RefCell<Vec<TapEvent>>>,
    loads: Rc<RefCell<Vec<(String, ImageTarget)>>>,
}

impl Outbox {
    pub fn take_taps(&self) -> Vec<TapEvent> {
        std::mem::take(&mut *self.taps.borrow_mut())
    }

    pub fn take_loads(&self) -> Vec<(String, ImageTarget)> {
        std::mem::take(&mut *self.loads.borrow_mut())
    }
}

pub struct JsDelegate {
    outbox: Outbox,
}

impl JsDelegate {
    pub fn new(outbox: Outbox) -> JsDelegate { JsDelegate { outbox } }
}

impl PuzzleDelegate for JsDelegate {
    fn piece_did_tap(&mut self, tile: TileId, index: PieceIndex) {
        self.outbox.taps.borrow_mut().push(TapEvent { tile, index });
    }
}

pub struct JsLoader {
    outbox: Outbox,
}

impl JsLoader {
    pub fn new(outbox: Outbox) -> JsLoader { JsLoader { outbox } }
}

impl ImageLoader for JsLoader {
    fn load(&mut self, url: &str, target: ImageTarget) {
        self.outbox.loads.borrow_mut().push((url.to_string(), target));
    }
}

/// Piece number a JS loader reports back with; 0 stands for the puzzle image.
pub fn target_code(target: ImageTarget) -> u32 {
    match target {
        ImageTarget::Puzzle => 0,
        ImageTarget::Cover(index) => index,
    }
}

pub fn target_from_code(code: u32) -> ImageTarget {
    if code == 0 { ImageTarget::Puzzle } else { ImageTarget::Cover(code) }
}

/// `f(tileId, pieceIndex)`.
pub fn call_tap(f: &Function, event: TapEvent) {
    let r = f.call2(&JsValue::NULL, &JsValue::from_f64(event.tile.0 as f64), &JsValue::from_f64(event.index as f64));
    if let Err(e) = r {
        warn(&format!("puzzle: tap callback threw: {}", describe(&e)));
    }
}

/// `f(url, target)`.
pub fn call_load(f: &Function, url: &str, target: ImageTarget) {
    let code = JsValue::from_f64(target_code(target) as f64);
    if let Err(e) = f.call2(&JsValue::NULL, &JsValue::from_str(url), &code) {
        warn(&format!("puzzle: image loader threw for {}: {}", url, describe(&e)));
    }
}
