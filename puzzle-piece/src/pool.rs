//! Recyclable placeholder tiles covering undiscovered pieces.
//!
//! Tiles live in an arena and are never dropped; a free list hands released
//! slots back out and a map from piece index to slot keeps binding lookups
//! constant time.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{ImageSlot, ImageSource, PieceIndex, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    /// Unbound, waiting in the free list.
    Idle,
    /// Bound and showing its cover; accepts one tap.
    Untapped,
    /// Tap already dispatched; cover hidden, further taps ignored.
    Tapped,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlaceholderTile {
    pub id: TileId,
    pub index: Option<PieceIndex>,
    pub frame: Rect,
    pub cover: ImageSlot,
    pub state: TileState,
    /// What `cover` was last assigned from.
    #[serde(skip)]
    cover_source: Option<ImageSource>,
}

impl PlaceholderTile {
    pub fn cover_visible(&self) -> bool {
        self.state == TileState::Untapped
    }

    fn reset(&mut self) {
        if self.state == TileState::Tapped {
            self.state = TileState::Untapped;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TapEvent {
    pub tile: TileId,
    pub index: PieceIndex,
}

#[derive(Clone, Debug, Default)]
pub struct PlaceholderTilePool {
    tiles: Vec<PlaceholderTile>,
    bound: HashMap<PieceIndex, TileId>,
    free: Vec<TileId>,
}

impl PlaceholderTilePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a tile to `index`, reusing a free one when possible. When the
    /// index already has a tile that tile is returned and only its frame is
    /// refreshed. The flag is true for a fresh binding.
    pub fn acquire(&mut self, index: PieceIndex, frame: Rect) -> (TileId, bool) {
        if let Some(&id) = self.bound.get(&index) {
            self.tiles[id.0 as usize].frame = frame;
            return (id, false);
        }
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = TileId(self.tiles.len() as u32);
                self.tiles.push(PlaceholderTile {
                    id,
                    index: None,
                    frame,
                    cover: ImageSlot::Empty,
                    state: TileState::Idle,
                    cover_source: None,
                });
                id
            }
        };
        let tile = &mut self.tiles[id.0 as usize];
        tile.index = Some(index);
        tile.frame = frame;
        tile.cover = ImageSlot::Empty;
        tile.cover_source = None;
        tile.state = TileState::Untapped;
        self.bound.insert(index, id);
        (id, true)
    }

    /// Unbinds the tile covering `index`. No-op when nothing is bound.
    pub fn release(&mut self, index: PieceIndex) -> bool {
        let Some(id) = self.bound.remove(&index) else {
            return false;
        };
        let tile = &mut self.tiles[id.0 as usize];
        tile.index = None;
        tile.cover = ImageSlot::Empty;
        tile.cover_source = None;
        tile.state = TileState::Idle;
        self.free.push(id);
        true
    }

    pub fn release_all(&mut self) -> usize {
        let mut indices: Vec<PieceIndex> = self.bound.keys().copied().collect();
        indices.sort_unstable();
        indices.into_iter().filter(|i| self.release(*i)).count()
    }

    /// Dispatches a tap on the tile covering `index`.
    ///
    /// Only an untapped tile accepts it. Accepting resets every other tapped
    /// tile back to untapped, so at most one tile is mid-selection.
    pub fn tap(&mut self, index: PieceIndex) -> Option<TapEvent> {
        let id = *self.bound.get(&index)?;
        if self.tiles[id.0 as usize].state != TileState::Untapped {
            return None;
        }
        self.tiles[id.0 as usize].state = TileState::Tapped;
        for (other, other_id) in &self.bound {
            if *other != index {
                self.tiles[other_id.0 as usize].reset();
            }
        }
        Some(TapEvent { tile: id, index })
    }

    /// Puts every tapped tile back to untapped.
    pub fn reset_taps(&mut self) {
        for id in self.bound.values() {
            self.tiles[id.0 as usize].reset();
        }
    }

    /// Points the cover of the tile over `index` at `source`. Returns the url
    /// the caller must start loading, if any. Re-assigning the source the
    /// tile already shows changes nothing, so a loaded url is not fetched
    /// again.
    pub fn assign_cover(&mut self, index: PieceIndex, source: Option<ImageSource>) -> Option<String> {
        let id = *self.bound.get(&index)?;
        let tile = &mut self.tiles[id.0 as usize];
        if tile.cover_source == source {
            return None;
        }
        let (slot, fetch) = match &source {
            Some(ImageSource::Image(Some(handle))) => (ImageSlot::Ready { handle: *handle }, None),
            Some(ImageSource::Url(url)) => (ImageSlot::Loading { url: url.clone() }, Some(url.clone())),
            Some(ImageSource::Image(None)) | None => (ImageSlot::Empty, None),
        };
        tile.cover = slot;
        tile.cover_source = source;
        fetch
    }

    pub fn set_cover(&mut self, index: PieceIndex, cover: ImageSlot) -> bool {
        match self.bound.get(&index) {
            Some(id) => {
                self.tiles[id.0 as usize].cover = cover;
                true
            }
            None => false,
        }
    }

    pub fn tile(&self, id: TileId) -> Option<&PlaceholderTile> {
        self.tiles.get(id.0 as usize)
    }

    pub fn tile_for(&self, index: PieceIndex) -> Option<&PlaceholderTile> {
        self.bound.get(&index).and_then(|id| self.tile(*id))
    }

    /// Bound tiles ordered by piece index.
    pub fn active(&self) -> Vec<&PlaceholderTile> {
        let mut out: Vec<&PlaceholderTile> = self.bound.values().filter_map(|id| self.tile(*id)).collect();
        out.sort_by_key(|t| t.index);
        out
    }

    pub fn bound_indices(&self) -> Vec<PieceIndex> {
        let mut out: Vec<PieceIndex> = self.bound.keys().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn active_count(&self) -> usize {
        self.bound.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Every tile ever built, bound or not.
    pub fn capacity(&self) -> usize {
        self.tiles.len()
    }
}
