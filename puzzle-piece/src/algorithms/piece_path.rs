use serde::Serialize;

use crate::algorithms::tie_line::tie_line;
use crate::error::PuzzleError;
use crate::geometry::builder::PathBuilder;
use crate::matrix::SignMatrices;
use crate::model::{EdgeDirection, Path, PieceIndex, Size, Vec2};

/// Corners and neighbouring hump signs of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PieceGeometry {
    pub index: PieceIndex,
    pub row: u32,
    pub col: u32,
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corners: [Vec2; 4],
    /// Top, right, bottom, left.
    pub signs: [i32; 4],
}

const WALK: [EdgeDirection; 4] = [
    EdgeDirection::Top,
    EdgeDirection::Right,
    EdgeDirection::Bottom,
    EdgeDirection::Left,
];

/// Size of one grid cell for a container of `bounds`.
pub fn cell_size(bounds: Size, matrices: &SignMatrices) -> Result<Size, PuzzleError> {
    if bounds.is_empty() {
        return Err(PuzzleError::UnsetSize);
    }
    Ok(Size {
        width: bounds.width / matrices.cols().max(1) as f32,
        height: bounds.height / matrices.rows().max(1) as f32,
    })
}

/// Row and column of a 1-based index, or `NotFoundPiece` when it is outside
/// the grid.
pub fn row_col(index: PieceIndex, matrices: &SignMatrices) -> Result<(u32, u32), PuzzleError> {
    let total = matrices.piece_count();
    if index == 0 || index > total {
        return Err(PuzzleError::NotFoundPiece { index, total });
    }
    let cols = matrices.cols();
    Ok(((index - 1) / cols, (index - 1) % cols))
}

fn sign_at(lines: &[Vec<i32>], line: u32, pos: u32) -> Option<i32> {
    lines.get(line as usize).and_then(|l| l.get(pos as usize)).copied()
}

pub fn piece_geometry(
    index: PieceIndex,
    matrices: &SignMatrices,
    cell: Size,
) -> Result<PieceGeometry, PuzzleError> {
    let (row, col) = row_col(index, matrices)?;
    let h = &matrices.horizontal;
    let v = &matrices.vertical;
    let lookup = || -> Option<[i32; 4]> {
        Some([
            sign_at(h, row, col)?,
            sign_at(v, col + 1, row)?,
            sign_at(h, row + 1, col)?,
            sign_at(v, col, row)?,
        ])
    };
    let signs = lookup().ok_or(PuzzleError::NotFoundPiece {
        index,
        total: matrices.piece_count(),
    })?;
    let x0 = cell.width * col as f32;
    let x1 = cell.width * (col + 1) as f32;
    let y0 = cell.height * row as f32;
    let y1 = cell.height * (row + 1) as f32;
    Ok(PieceGeometry {
        index,
        row,
        col,
        corners: [Vec2::new(x0, y0), Vec2::new(x1, y0), Vec2::new(x1, y1), Vec2::new(x0, y1)],
        signs,
    })
}

/// Closed outline of piece `index`: the cell rectangle walked clockwise on
/// screen from its top-left corner, with a hump on every edge whose sign is
/// non-zero.
pub fn build_piece_path(
    index: PieceIndex,
    matrices: &SignMatrices,
    cell: Size,
    hump: f32,
) -> Result<Path, PuzzleError> {
    if cell.is_empty() {
        return Err(PuzzleError::UnsetSize);
    }
    let geo = piece_geometry(index, matrices, cell)?;
    Ok(trace_piece(&geo, hump))
}

pub fn trace_piece(geo: &PieceGeometry, hump: f32) -> Path {
    let mut b = PathBuilder::new();
    b.move_to(geo.corners[0]);
    for (i, dir) in WALK.iter().enumerate() {
        tie_line(&mut b, geo.corners[(i + 1) % 4], geo.signs[i], *dir, hump);
    }
    b.close();
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::PieceMatrix;

    #[test]
    fn center_piece_of_3x3_reads_all_four_neighbours() {
        let m = PieceMatrix::Grid3x3.resolve();
        let geo = piece_geometry(5, &m, Size::new(100.0, 80.0)).unwrap();
        assert_eq!((geo.row, geo.col), (1, 1));
        assert_eq!(geo.signs, [1, 1, -1, -1]);
        assert_eq!(geo.corners[0], Vec2::new(100.0, 80.0));
        assert_eq!(geo.corners[2], Vec2::new(200.0, 160.0));
    }

    #[test]
    fn corner_piece_has_flat_outer_edges() {
        let m = PieceMatrix::Grid4x4.resolve();
        let geo = piece_geometry(1, &m, Size::new(10.0, 10.0)).unwrap();
        assert_eq!(geo.signs[0], 0);
        assert_eq!(geo.signs[3], 0);
        let path = trace_piece(&geo, 4.0);
        assert_eq!(path.arc_count(), 2);
        assert_eq!(path.subpath_count(), 1);
    }

    #[test]
    fn out_of_range_and_zero_cell() {
        let m = PieceMatrix::Grid2x2.resolve();
        assert_eq!(
            build_piece_path(5, &m, Size::new(10.0, 10.0), 2.0),
            Err(PuzzleError::NotFoundPiece { index: 5, total: 4 })
        );
        assert_eq!(
            build_piece_path(0, &m, Size::new(10.0, 10.0), 2.0),
            Err(PuzzleError::NotFoundPiece { index: 0, total: 4 })
        );
        assert_eq!(build_piece_path(1, &m, Size::new(0.0, 10.0), 2.0), Err(PuzzleError::UnsetSize));
    }

    #[test]
    fn short_custom_table_is_not_found() {
        let m = PieceMatrix::Custom {
            h_lines: vec![vec![0, 0], vec![0]],
            v_lines: vec![vec![0], vec![0], vec![0]],
        }
        .resolve();
        assert!(matches!(
            build_piece_path(2, &m, Size::new(10.0, 10.0), 2.0),
            Err(PuzzleError::NotFoundPiece { index: 2, .. })
        ));
    }
}
