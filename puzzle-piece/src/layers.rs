//! Compositing layers handed to the host renderer.
//!
//! The reveal mask is an owned value that only the state tracker patches;
//! every mutation bumps its version so hosts can skip redraws.

use serde::Serialize;

use crate::model::{Color, ImageHandle, ImageSlot, ImageSource, Path, PieceIndex};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaskEntry {
    pub index: PieceIndex,
    pub path: Path,
}

/// Accumulated clip region for the full-brightness image.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MaskLayer {
    entries: Vec<MaskEntry>,
    version: u64,
}

impl MaskLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MaskEntry] {
        &self.entries
    }

    pub fn contains(&self, index: PieceIndex) -> bool {
        self.entries.iter().any(|e| e.index == index)
    }

    pub fn indices(&self) -> Vec<PieceIndex> {
        self.entries.iter().map(|e| e.index).collect()
    }

    pub fn push(&mut self, index: PieceIndex, path: Path) {
        self.entries.push(MaskEntry { index, path });
        self.version = self.version.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.version = self.version.wrapping_add(1);
    }

    /// All revealed contours as a single path, for hosts that clip with one.
    pub fn combined(&self) -> Path {
        let mut out = Path::default();
        for e in &self.entries {
            out.append(e.path.clone());
        }
        out
    }
}

/// Static grid stroke drawn above the images.
#[derive(Clone, Debug, Serialize)]
pub struct OutlineLayer {
    pub path: Path,
    pub stroke: Color,
    pub width: f32,
    version: u64,
}

impl OutlineLayer {
    pub fn new(stroke: Color, width: f32) -> Self {
        OutlineLayer { path: Path::default(), stroke, width, version: 0 }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.version = self.version.wrapping_add(1);
    }
}

/// Dimmed background image plus the masked foreground copy. Both always
/// show the same source.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImageLayers {
    pub background: ImageSlot,
    pub foreground: ImageSlot,
    pub dim_alpha: f32,
    #[serde(skip)]
    source: Option<ImageSource>,
}

impl ImageLayers {
    pub fn new(dim_alpha: f32) -> Self {
        ImageLayers { dim_alpha, ..Default::default() }
    }

    /// Points both layers at `source`. Returns the url the caller must start
    /// loading, if any; re-assigning the current url does not restart it.
    pub fn assign(&mut self, source: &ImageSource) -> Option<String> {
        if self.source.as_ref() == Some(source) {
            return None;
        }
        self.source = Some(source.clone());
        let (slot, fetch) = match source {
            ImageSource::Image(Some(handle)) => (ImageSlot::Ready { handle: *handle }, None),
            ImageSource::Image(None) => (ImageSlot::Empty, None),
            ImageSource::Url(url) => (ImageSlot::Loading { url: url.clone() }, Some(url.clone())),
        };
        self.background = slot.clone();
        self.foreground = slot;
        fetch
    }

    /// Completion of an asynchronous load. Ignored unless `url` is still the
    /// one being waited on.
    pub fn loaded(&mut self, url: &str, handle: ImageHandle) -> bool {
        match &self.foreground {
            ImageSlot::Loading { url: want } if want == url => {
                self.background = ImageSlot::Ready { handle };
                self.foreground = ImageSlot::Ready { handle };
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_version_moves_on_change_only() {
        let mut m = MaskLayer::new();
        m.clear();
        assert_eq!(m.version(), 0);
        m.push(3, Path::default());
        assert_eq!(m.version(), 1);
        assert!(m.contains(3));
        m.clear();
        assert_eq!(m.version(), 2);
        assert!(m.is_empty());
    }

    #[test]
    fn url_images_load_once_and_ignore_stale_completions() {
        let mut layers = ImageLayers::new(0.8);
        let src = ImageSource::Url("https://img/a.png".into());
        assert_eq!(layers.assign(&src).as_deref(), Some("https://img/a.png"));
        assert_eq!(layers.assign(&src), None);
        assert!(!layers.loaded("https://img/old.png", ImageHandle(1)));
        assert!(layers.loaded("https://img/a.png", ImageHandle(2)));
        assert_eq!(layers.background, ImageSlot::Ready { handle: ImageHandle(2) });
        assert_eq!(layers.foreground, layers.background);
    }
}
