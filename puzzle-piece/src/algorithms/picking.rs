use crate::algorithms::piece_path::row_col;
use crate::algorithms::winding::point_in_polygon_nonzero;
use crate::error::PuzzleError;
use crate::geometry::flatten::flatten_path;
use crate::geometry::math::signed_area;
use crate::geometry::tolerance::EPS_AREA;
use crate::layers::MaskLayer;
use crate::matrix::SignMatrices;
use crate::model::{PieceIndex, Rect, Size, Vec2};

/// Grid cell under `p`, ignoring humps.
pub fn cell_at(p: Vec2, cell: Size, rows: u32, cols: u32) -> Option<(u32, u32)> {
    if cell.is_empty() || !(p.x >= 0.0 && p.y >= 0.0) {
        return None;
    }
    let row = (p.y / cell.height) as u32;
    let col = (p.x / cell.width) as u32;
    if row >= rows || col >= cols {
        return None;
    }
    Some((row, col))
}

pub fn piece_at(p: Vec2, matrices: &SignMatrices, cell: Size) -> Option<PieceIndex> {
    let cols = matrices.cols();
    cell_at(p, cell, matrices.rows(), cols).map(|(row, col)| row * cols + col + 1)
}

/// Rectangle of the cell behind piece `index`; placeholder tiles use it.
pub fn piece_frame(index: PieceIndex, matrices: &SignMatrices, cell: Size) -> Result<Rect, PuzzleError> {
    let (row, col) = row_col(index, matrices)?;
    Ok(Rect {
        x: cell.width * col as f32,
        y: cell.height * row as f32,
        width: cell.width,
        height: cell.height,
    })
}

/// Revealed piece whose outline (humps included) contains `p`. Later
/// reveals win when outlines overlap.
pub fn hit_revealed(p: Vec2, mask: &MaskLayer, tol: f32) -> Option<PieceIndex> {
    mask.entries().iter().rev().find_map(|entry| {
        flatten_path(&entry.path, tol)
            .iter()
            .filter(|poly| signed_area(poly).abs() > EPS_AREA)
            .any(|poly| point_in_polygon_nonzero(p.x, p.y, poly))
            .then_some(entry.index)
    })
}
