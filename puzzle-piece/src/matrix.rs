//! Boundary sign tables for each grid shape.
//!
//! `horizontal` holds one line per horizontal grid line (top border first),
//! each with one entry per column. `vertical` holds one line per vertical
//! grid line (left border first), each with one entry per row. An entry of
//! `+1` bulges toward -y on a horizontal line and toward +x on a vertical
//! one, `-1` the other way, `0` is flat.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PieceMatrix {
    #[serde(rename = "grid2x2")]
    Grid2x2,
    #[serde(rename = "grid3x3")]
    Grid3x3,
    /// Three columns, four rows.
    #[serde(rename = "grid3x4")]
    Grid3x4,
    #[serde(rename = "grid4x4")]
    Grid4x4,
    Custom {
        h_lines: Vec<Vec<i32>>,
        v_lines: Vec<Vec<i32>>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignMatrices {
    pub horizontal: Vec<Vec<i32>>,
    pub vertical: Vec<Vec<i32>>,
}

fn table<const R: usize, const C: usize>(rows: [[i32; C]; R]) -> Vec<Vec<i32>> {
    rows.iter().map(|r| r.to_vec()).collect()
}

impl PieceMatrix {
    /// Custom tables are passed through untouched; a malformed one only
    /// shows up when a piece path is requested.
    pub fn resolve(&self) -> SignMatrices {
        match self {
            PieceMatrix::Grid2x2 => SignMatrices {
                horizontal: table([[0, 0], [-1, 1], [0, 0]]),
                vertical: table([[0, 0], [-1, 1], [0, 0]]),
            },
            PieceMatrix::Grid3x3 => SignMatrices {
                horizontal: table([[0, 0, 0], [-1, 1, -1], [1, -1, 1], [0, 0, 0]]),
                vertical: table([[0, 0, 0], [1, -1, 1], [-1, 1, -1], [0, 0, 0]]),
            },
            PieceMatrix::Grid3x4 => SignMatrices {
                horizontal: table([[0, 0, 0], [1, -1, 1], [-1, 1, -1], [1, -1, 1], [0, 0, 0]]),
                vertical: table([[0, 0, 0, 0], [1, -1, 1, -1], [-1, 1, -1, 1], [0, 0, 0, 0]]),
            },
            PieceMatrix::Grid4x4 => SignMatrices {
                horizontal: table([
                    [0, 0, 0, 0],
                    [1, -1, 1, -1],
                    [-1, 1, -1, 1],
                    [1, -1, 1, -1],
                    [0, 0, 0, 0],
                ]),
                vertical: table([
                    [0, 0, 0, 0],
                    [-1, 1, -1, 1],
                    [1, -1, 1, -1],
                    [-1, 1, -1, 1],
                    [0, 0, 0, 0],
                ]),
            },
            PieceMatrix::Custom { h_lines, v_lines } => SignMatrices {
                horizontal: h_lines.clone(),
                vertical: v_lines.clone(),
            },
        }
    }
}

impl SignMatrices {
    pub fn rows(&self) -> u32 {
        self.horizontal.len().saturating_sub(1) as u32
    }

    pub fn cols(&self) -> u32 {
        self.vertical.len().saturating_sub(1) as u32
    }

    pub fn piece_count(&self) -> u32 {
        self.rows() * self.cols()
    }

    /// Whether the outer border lines are all flat. Presets always are.
    pub fn has_flat_border(&self) -> bool {
        let flat = |line: Option<&Vec<i32>>| line.map_or(true, |l| l.iter().all(|v| *v == 0));
        flat(self.horizontal.first())
            && flat(self.horizontal.last())
            && flat(self.vertical.first())
            && flat(self.vertical.last())
    }
}
