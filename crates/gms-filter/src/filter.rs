//! GMS filter facade: runs the four grid phases and merges their inliers.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    inlier_threshold, select_phase_inliers, GmsError, GmsParams, Grid, GridPhase, ImageSize,
    Keypoint, MatchSide, PhaseVotes, PutativeMatch, GRID_PHASES,
};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-phase diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    /// Phase index in `0..4`.
    pub phase: usize,
    pub offset: GridPhase,
    /// Neighborhood score a pair had to exceed.
    pub threshold: f32,
    /// Source cells with at least one match.
    pub occupied_cells: usize,
    pub accepted_cell_pairs: usize,
    pub accepted_matches: usize,
}

/// Filter output with diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GmsResult {
    /// Accepted matches, in input order.
    pub matches: Vec<PutativeMatch>,
    /// Input positions of `matches`.
    pub inliers: Vec<usize>,
    pub phases: Vec<PhaseReport>,
}

/// Grid-based motion statistics match filter.
#[derive(Clone, Debug)]
pub struct GmsFilter {
    params: GmsParams,
}

impl GmsFilter {
    pub fn new(params: GmsParams) -> Result<Self, GmsError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &GmsParams {
        &self.params
    }

    /// Keep the matches whose cell pair is motion-consistent in any phase.
    pub fn filter(
        &self,
        image_src: ImageSize,
        image_dst: ImageSize,
        kp_src: &[Keypoint],
        kp_dst: &[Keypoint],
        matches: &[PutativeMatch],
    ) -> Result<Vec<PutativeMatch>, GmsError> {
        self.filter_with_report(image_src, image_dst, kp_src, kp_dst, matches)
            .map(|r| r.matches)
    }

    /// Same as [`GmsFilter::filter`], also returning per-phase statistics.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, kp_src, kp_dst, matches),
            fields(matches = matches.len())
        )
    )]
    pub fn filter_with_report(
        &self,
        image_src: ImageSize,
        image_dst: ImageSize,
        kp_src: &[Keypoint],
        kp_dst: &[Keypoint],
        matches: &[PutativeMatch],
    ) -> Result<GmsResult, GmsError> {
        let grid_src = Grid::new(image_src, self.params.grid_size)?;
        let grid_dst = Grid::new(image_dst, self.params.grid_size)?;
        check_match_indices(matches, kp_src.len(), kp_dst.len())?;

        if matches.is_empty() {
            warn!("no putative matches to filter");
        }

        let threshold = inlier_threshold(matches.len(), self.params.threshold_factor);
        let ctx = PhaseContext {
            matches,
            kp_src,
            kp_dst,
            grid_src: &grid_src,
            grid_dst: &grid_dst,
            threshold,
        };

        let outcomes = run_phases(&ctx);

        let mut keep = vec![false; matches.len()];
        let mut phases = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            for &idx in &outcome.inliers {
                keep[idx] = true;
            }
            phases.push(outcome.report);
        }

        let inliers: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        let kept: Vec<PutativeMatch> = inliers.iter().map(|&i| matches[i]).collect();

        info!(
            "GMS kept {} of {} matches (threshold {threshold:.2})",
            kept.len(),
            matches.len()
        );

        Ok(GmsResult {
            matches: kept,
            inliers,
            phases,
        })
    }
}

/// Filter with default parameters.
pub fn filter_matches(
    image_src: ImageSize,
    image_dst: ImageSize,
    kp_src: &[Keypoint],
    kp_dst: &[Keypoint],
    matches: &[PutativeMatch],
) -> Result<Vec<PutativeMatch>, GmsError> {
    GmsFilter::new(GmsParams::default())?.filter(image_src, image_dst, kp_src, kp_dst, matches)
}

fn check_match_indices(
    matches: &[PutativeMatch],
    src_len: usize,
    dst_len: usize,
) -> Result<(), GmsError> {
    for (match_index, m) in matches.iter().enumerate() {
        if m.src_idx >= src_len {
            return Err(GmsError::KeypointIndexOutOfRange {
                match_index,
                side: MatchSide::Source,
                index: m.src_idx,
                len: src_len,
            });
        }
        if m.dst_idx >= dst_len {
            return Err(GmsError::KeypointIndexOutOfRange {
                match_index,
                side: MatchSide::Destination,
                index: m.dst_idx,
                len: dst_len,
            });
        }
    }
    Ok(())
}

/// Read-only inputs shared by all phases.
struct PhaseContext<'a> {
    matches: &'a [PutativeMatch],
    kp_src: &'a [Keypoint],
    kp_dst: &'a [Keypoint],
    grid_src: &'a Grid,
    grid_dst: &'a Grid,
    threshold: f32,
}

struct PhaseOutcome {
    report: PhaseReport,
    inliers: Vec<usize>,
}

#[cfg(not(feature = "rayon"))]
fn run_phases(ctx: &PhaseContext<'_>) -> Vec<PhaseOutcome> {
    let mut votes = PhaseVotes::new(ctx.grid_src.cell_count());
    GRID_PHASES
        .iter()
        .enumerate()
        .map(|(k, &phase)| {
            votes.clear();
            run_phase(ctx, &mut votes, k, phase)
        })
        .collect()
}

#[cfg(feature = "rayon")]
fn run_phases(ctx: &PhaseContext<'_>) -> Vec<PhaseOutcome> {
    GRID_PHASES[..]
        .par_iter()
        .enumerate()
        .map(|(k, &phase)| {
            let mut votes = PhaseVotes::new(ctx.grid_src.cell_count());
            run_phase(ctx, &mut votes, k, phase)
        })
        .collect()
}

fn run_phase(
    ctx: &PhaseContext<'_>,
    votes: &mut PhaseVotes,
    k: usize,
    phase: GridPhase,
) -> PhaseOutcome {
    votes.accumulate(
        ctx.matches,
        ctx.kp_src,
        ctx.kp_dst,
        ctx.grid_src,
        ctx.grid_dst,
        phase,
    );
    let selected = select_phase_inliers(votes, ctx.grid_src.size, ctx.threshold);

    let inliers: Vec<usize> = selected
        .iter()
        .flat_map(|s| s.matches.iter().map(|m| m.match_index))
        .collect();

    let report = PhaseReport {
        phase: k,
        offset: phase,
        threshold: ctx.threshold,
        occupied_cells: votes.occupied_cells(),
        accepted_cell_pairs: selected.len(),
        accepted_matches: inliers.len(),
    };
    debug!(
        "phase {k} ({:.1}, {:.1}): {} occupied cells, {} pairs accepted, {} matches",
        phase.ox,
        phase.oy,
        report.occupied_cells,
        report.accepted_cell_pairs,
        report.accepted_matches
    );

    PhaseOutcome { report, inliers }
}
