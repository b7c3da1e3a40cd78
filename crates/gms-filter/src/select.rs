//! Inlier selection for one grid phase.
//!
//! Each occupied source cell votes for its dominant destination cell (the
//! highest bin count in its row). The pair is kept when the 3×3 neighborhood
//! score around that destination beats the phase threshold.
//!
//! Threshold: `τ = sqrt(factor · M)`, `M` the number of putative matches.
//! This is the GMS law `α·sqrt(n̄)` with the mean per-cell density
//! `n̄ = M / N²` and `α = N·sqrt(factor)`; under uniformly scattered false
//! matches the neighborhood count of a source cell grows like `sqrt(n̄)`.

use crate::{neighborhood_score, CellMatch, PhaseVotes};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Minimal neighborhood score (exclusive) for a cell pair to be accepted.
pub fn inlier_threshold(total_matches: usize, threshold_factor: f32) -> f32 {
    (threshold_factor.max(0.0) * total_matches as f32).sqrt()
}

/// Highest-count destination cell of `src`, lowest index on ties.
///
/// Returns `None` when the source cell has no matches.
pub fn dominant_destination(votes: &PhaseVotes, src: usize) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (dst, &count) in votes.bins.row(src).iter().enumerate() {
        if count == 0 {
            continue;
        }
        match best {
            Some((_, c)) if c >= count => {}
            _ => best = Some((dst, count)),
        }
    }
    best
}

/// An accepted `(source cell, destination cell)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseSelection {
    pub src_cell: usize,
    pub dst_cell: usize,
    pub score: u32,
    /// Matches of the pair, in input order.
    pub matches: Vec<CellMatch>,
}

/// Accepted cell pairs of one phase.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(votes), fields(cells = votes.cell_matches.len()))
)]
pub fn select_phase_inliers(
    votes: &PhaseVotes,
    grid_size: usize,
    threshold: f32,
) -> Vec<PhaseSelection> {
    let mut out = Vec::new();

    for (src, cell) in votes.cell_matches.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        let Some((dst, _)) = dominant_destination(votes, src) else {
            continue;
        };

        // The dominant bin is non-empty, so `score >= 1`.
        let score = neighborhood_score(&votes.bins, grid_size, src, dst);
        if (score as f32) <= threshold {
            continue;
        }

        let matches: Vec<CellMatch> = cell
            .iter()
            .filter(|m| m.dst_cell == dst)
            .copied()
            .collect();
        out.push(PhaseSelection {
            src_cell: src,
            dst_cell: dst,
            score,
            matches,
        });
    }

    out
}
