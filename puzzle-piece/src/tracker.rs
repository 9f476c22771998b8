use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::PuzzleError;
use crate::model::PieceIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceState {
    Hidden,
    Revealed,
}

/// What one refresh has to do, worked out before anything is touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshPlan {
    /// Supplied indices not yet revealed, deduplicated, in supplied order.
    pub newly_revealed: Vec<PieceIndex>,
    /// Indices that need a placeholder tile (absent from the supplied list).
    pub covered: Vec<PieceIndex>,
    /// Indices present in the supplied list.
    pub uncovered: Vec<PieceIndex>,
}

/// Hidden -> Revealed bookkeeping for one shape lifetime.
#[derive(Clone, Debug, Default)]
pub struct PieceStateTracker {
    revealed: BTreeSet<PieceIndex>,
}

impl PieceStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, index: PieceIndex) -> PieceState {
        if self.revealed.contains(&index) {
            PieceState::Revealed
        } else {
            PieceState::Hidden
        }
    }

    pub fn is_revealed(&self, index: PieceIndex) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed(&self) -> impl Iterator<Item = PieceIndex> + '_ {
        self.revealed.iter().copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Validates every supplied index against `1..=total` first, so a bad
    /// list fails without side effects.
    pub fn plan(&self, supplied: &[PieceIndex], total: u32) -> Result<RefreshPlan, PuzzleError> {
        if let Some(&index) = supplied.iter().find(|i| **i == 0 || **i > total) {
            return Err(PuzzleError::NotFoundPiece { index, total });
        }
        let listed: HashSet<PieceIndex> = supplied.iter().copied().collect();
        let mut seen = HashSet::new();
        let newly_revealed = supplied
            .iter()
            .copied()
            .filter(|i| !self.revealed.contains(i) && seen.insert(*i))
            .collect();
        let (uncovered, covered): (Vec<PieceIndex>, Vec<PieceIndex>) =
            (1..=total).partition(|i| listed.contains(i));
        Ok(RefreshPlan { newly_revealed, covered, uncovered })
    }

    /// One-way; returns false when the piece was already revealed.
    pub fn mark_revealed(&mut self, index: PieceIndex) -> bool {
        self.revealed.insert(index)
    }

    /// Forget everything; only used when the grid itself changes.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }
}
