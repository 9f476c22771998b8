use std::cell::RefCell;

use js_sys::Function;
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod feed;
mod interop;

pub use api::set_panic_hook;

/// JS handle to a puzzle widget. The wrapped view never sees the JS data
/// source directly: every reload pulls one validated snapshot from it first.
///
/// No JS runs while `inner` is borrowed. Taps and image loads are queued in
/// `outbox` and handed to their callbacks after the call that produced them
/// has released the view, so callbacks may call back into it.
#[wasm_bindgen]
pub struct PuzzleView {
    pub(crate) inner: RefCell<puzzle_piece::PuzzleView>,
    pub(crate) feed: RefCell<Option<feed::JsFeed>>,
    pub(crate) outbox: feed::Outbox,
    pub(crate) on_tap: RefCell<Option<Function>>,
    pub(crate) on_load: RefCell<Option<Function>>,
}

impl PuzzleView {
    pub fn rs_new(config: puzzle_piece::ViewConfig) -> PuzzleView {
        PuzzleView {
            inner: RefCell::new(puzzle_piece::PuzzleView::new(config)),
            feed: RefCell::new(None),
            outbox: feed::Outbox::default(),
            on_tap: RefCell::new(None),
            on_load: RefCell::new(None),
        }
    }
}
