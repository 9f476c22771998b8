use crate::algorithms::tie_line::tie_line;
use crate::error::PuzzleError;
use crate::geometry::builder::PathBuilder;
use crate::matrix::SignMatrices;
use crate::model::{EdgeDirection, Path, Size, Vec2};

/// Stroke path of every interior grid line. The outer border is left out.
///
/// Horizontal lines are traced left to right as `Top` edges and vertical
/// lines top to bottom as `Right` edges: the same walk the piece below a
/// horizontal line (or left of a vertical one) makes, so humps land on the
/// same arcs as the masks.
pub fn build_grid_lines(matrices: &SignMatrices, cell: Size, hump: f32) -> Result<Path, PuzzleError> {
    if cell.is_empty() {
        return Err(PuzzleError::UnsetSize);
    }
    let rows = matrices.rows() as usize;
    let cols = matrices.cols() as usize;
    let mut out = Path::default();

    for (i, line) in matrices.horizontal.iter().enumerate().take(rows).skip(1) {
        let y = cell.height * i as f32;
        let mut b = PathBuilder::new();
        b.move_to(Vec2::new(0.0, y));
        for (j, sign) in line.iter().enumerate() {
            tie_line(&mut b, Vec2::new(cell.width * (j + 1) as f32, y), *sign, EdgeDirection::Top, hump);
        }
        out.append(b.build());
    }

    for (i, line) in matrices.vertical.iter().enumerate().take(cols).skip(1) {
        let x = cell.width * i as f32;
        let mut b = PathBuilder::new();
        b.move_to(Vec2::new(x, 0.0));
        for (j, sign) in line.iter().enumerate() {
            tie_line(&mut b, Vec2::new(x, cell.height * (j + 1) as f32), *sign, EdgeDirection::Right, hump);
        }
        out.append(b.build());
    }

    tracing::debug!(rows, cols, hump, subpaths = out.subpath_count(), "grid outline rebuilt");
    Ok(out)
}
