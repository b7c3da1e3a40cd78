//! Fixed half-cell grid phases.
//!
//! Running the same grid four times, shifted by half a cell along x, y and
//! both, keeps a coherent cluster from straddling a cell boundary in every
//! pass at once.

use serde::{Deserialize, Serialize};

/// Fractional grid offset, in units of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPhase {
    pub ox: f32,
    pub oy: f32,
}

/// Number of phases evaluated per filter run.
pub const PHASE_COUNT: usize = 4;

/// The four phases, in evaluation order.
pub const GRID_PHASES: [GridPhase; PHASE_COUNT] = [
    GridPhase { ox: 0.0, oy: 0.0 },
    GridPhase { ox: 0.5, oy: 0.0 },
    GridPhase { ox: 0.0, oy: 0.5 },
    GridPhase { ox: 0.5, oy: 0.5 },
];

impl GridPhase {
    pub const IDENTITY: GridPhase = GRID_PHASES[0];

    /// Phase `k` in `0..4`, or `None` for any other index.
    #[inline]
    pub fn from_index(k: usize) -> Option<GridPhase> {
        GRID_PHASES.get(k).copied()
    }
}
