use crate::config::ViewConfig;
use crate::model::{Color, ImageSlot, PieceIndex, Rect, Size};
use crate::pool::TileState;
use crate::svg::{mask_to_svg_paths, to_svg_path};
use crate::view::PuzzleView;
use serde::Serialize;
use serde_json::Value;

pub const DOC_VERSION: u32 = 1;

/// Render document for a host that draws from SVG path data instead of
/// walking [`crate::view::Scene`] itself.
pub fn to_json_impl(v: &PuzzleView) -> Value {
    #[derive(Serialize)]
    struct GridSer {
        rows: u32,
        cols: u32,
        hump: f32,
        size: Size,
    }
    #[derive(Serialize)]
    struct MaskSer {
        index: PieceIndex,
        d: String,
    }
    #[derive(Serialize)]
    struct OutlineSer {
        d: String,
        stroke: Color,
        width: f32,
    }
    #[derive(Serialize)]
    struct TileSer {
        id: u32,
        index: PieceIndex,
        frame: Rect,
        cover: ImageSlot,
        tapped: bool,
    }
    #[derive(Serialize)]
    struct Doc {
        version: u32,
        grid: GridSer,
        background: ImageSlot,
        foreground: ImageSlot,
        dim_alpha: f32,
        revealed: Vec<PieceIndex>,
        mask: Vec<MaskSer>,
        mask_version: u64,
        outline: OutlineSer,
        tiles: Vec<TileSer>,
        config: ViewConfig,
    }

    let m = v.matrices();
    let paths = mask_to_svg_paths(v.mask());
    let mask = v
        .mask()
        .entries()
        .iter()
        .zip(paths)
        .map(|(e, d)| MaskSer { index: e.index, d })
        .collect();
    let tiles = v
        .pool()
        .active()
        .into_iter()
        .filter_map(|t| {
            Some(TileSer {
                id: t.id.0,
                index: t.index?,
                frame: t.frame,
                cover: t.cover.clone(),
                tapped: t.state == TileState::Tapped,
            })
        })
        .collect();
    let outline = v.outline();
    let doc = Doc {
        version: DOC_VERSION,
        grid: GridSer { rows: m.rows(), cols: m.cols(), hump: v.hump(), size: v.size() },
        background: v.images().background.clone(),
        foreground: v.images().foreground.clone(),
        dim_alpha: v.images().dim_alpha,
        revealed: v.tracker().revealed().collect(),
        mask,
        mask_version: v.mask().version(),
        outline: OutlineSer { d: to_svg_path(&outline.path), stroke: outline.stroke, width: outline.width },
        tiles,
        config: v.config().clone(),
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}
