//! Per-phase cell-pair vote accumulation.

use nalgebra::Point2;

use crate::{Grid, GridPhase, Keypoint, PutativeMatch};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A putative match annotated with the cell pair it falls into for one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMatch {
    pub src_cell: usize,
    pub dst_cell: usize,
    pub src_point: Point2<f32>,
    pub dst_point: Point2<f32>,
    /// Position of the match in the caller's input list.
    pub match_index: usize,
    pub putative: PutativeMatch,
}

/// Dense `N²×N²` count matrix: `bins[src][dst]` is the number of matches
/// from source cell `src` to destination cell `dst`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBins {
    cells: usize,
    counts: Vec<u32>,
}

impl CellBins {
    /// Zeroed matrix for `cells` cells per image.
    pub fn new(cells: usize) -> Self {
        Self {
            cells,
            counts: vec![0; cells * cells],
        }
    }

    /// Number of cells per image (`N²`).
    #[inline]
    pub fn cells(&self) -> usize {
        self.cells
    }

    #[inline]
    pub fn get(&self, src: usize, dst: usize) -> u32 {
        self.counts[src * self.cells + dst]
    }

    /// Destination counts of source cell `src`.
    #[inline]
    pub fn row(&self, src: usize) -> &[u32] {
        let start = src * self.cells;
        &self.counts[start..start + self.cells]
    }

    #[inline]
    pub fn increment(&mut self, src: usize, dst: usize) {
        self.counts[src * self.cells + dst] += 1;
    }

    /// Sum over all cell pairs.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
    }
}

/// Votes of one grid phase: matches grouped by source cell plus the bin counts.
#[derive(Clone, Debug)]
pub struct PhaseVotes {
    /// `cell_matches[src]` holds the matches of source cell `src`, in input order.
    pub cell_matches: Vec<Vec<CellMatch>>,
    pub bins: CellBins,
}

impl PhaseVotes {
    /// Empty votes for grids with `cells` cells.
    pub fn new(cells: usize) -> Self {
        Self {
            cell_matches: vec![Vec::new(); cells],
            bins: CellBins::new(cells),
        }
    }

    /// Reset the counts and match lists, keeping allocations.
    pub fn clear(&mut self) {
        for list in &mut self.cell_matches {
            list.clear();
        }
        self.bins.clear();
    }

    /// Assign every match to its cell pair under `phase`.
    ///
    /// Both grids must have the same size and all match indices must be valid
    /// for the keypoint lists; callers check this up front.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(matches = matches.len()))
    )]
    pub fn accumulate(
        &mut self,
        matches: &[PutativeMatch],
        kp_src: &[Keypoint],
        kp_dst: &[Keypoint],
        grid_src: &Grid,
        grid_dst: &Grid,
        phase: GridPhase,
    ) {
        debug_assert_eq!(grid_src.size, grid_dst.size);
        debug_assert_eq!(self.bins.cells(), grid_src.cell_count());

        for (match_index, m) in matches.iter().enumerate() {
            let src_point = kp_src[m.src_idx].position;
            let dst_point = kp_dst[m.dst_idx].position;
            let src_cell = grid_src.cell_index(src_point, phase);
            let dst_cell = grid_dst.cell_index(dst_point, phase);

            self.cell_matches[src_cell].push(CellMatch {
                src_cell,
                dst_cell,
                src_point,
                dst_point,
                match_index,
                putative: *m,
            });
            self.bins.increment(src_cell, dst_cell);
        }
    }

    /// Number of source cells holding at least one match.
    pub fn occupied_cells(&self) -> usize {
        self.cell_matches.iter().filter(|l| !l.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageSize, GRID_PHASES};

    fn setup() -> (Vec<Keypoint>, Vec<Keypoint>, Vec<PutativeMatch>, Grid) {
        let kp1 = vec![
            Keypoint::new(10.0, 10.0),
            Keypoint::new(20.0, 12.0),
            Keypoint::new(630.0, 470.0),
        ];
        let kp2 = vec![
            Keypoint::new(100.0, 10.0),
            Keypoint::new(110.0, 14.0),
            Keypoint::new(5.0, 5.0),
        ];
        let matches = vec![
            PutativeMatch::new(0, 0, 1.0),
            PutativeMatch::new(1, 1, 2.0),
            PutativeMatch::new(2, 2, 3.0),
        ];
        let grid = Grid::new(ImageSize::new(640, 480), 10).expect("grid");
        (kp1, kp2, matches, grid)
    }

    #[test]
    fn every_match_lands_in_exactly_one_pair() {
        let (kp1, kp2, matches, grid) = setup();
        for phase in GRID_PHASES {
            let mut votes = PhaseVotes::new(grid.cell_count());
            votes.accumulate(&matches, &kp1, &kp2, &grid, &grid, phase);
            assert_eq!(votes.bins.total(), matches.len() as u64);
            let listed: usize = votes.cell_matches.iter().map(Vec::len).sum();
            assert_eq!(listed, matches.len());
        }
    }

    #[test]
    fn identity_phase_bins_and_lists() {
        let (kp1, kp2, matches, grid) = setup();
        let mut votes = PhaseVotes::new(grid.cell_count());
        votes.accumulate(&matches, &kp1, &kp2, &grid, &grid, GridPhase::IDENTITY);

        assert_eq!(votes.bins.get(0, 1), 2);
        assert_eq!(votes.bins.get(99, 0), 1);
        assert_eq!(votes.occupied_cells(), 2);

        let cell0 = &votes.cell_matches[0];
        assert_eq!(cell0.len(), 2);
        assert_eq!(cell0[0].match_index, 0);
        assert_eq!(cell0[1].match_index, 1);
        assert_eq!(cell0[1].dst_cell, 1);
        assert_eq!(cell0[1].putative.distance, 2.0);
    }

    #[test]
    fn clear_resets_state() {
        let (kp1, kp2, matches, grid) = setup();
        let mut votes = PhaseVotes::new(grid.cell_count());
        votes.accumulate(&matches, &kp1, &kp2, &grid, &grid, GRID_PHASES[3]);
        votes.clear();
        assert_eq!(votes.bins.total(), 0);
        assert_eq!(votes.occupied_cells(), 0);
    }
}
