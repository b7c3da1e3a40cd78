//! 3×3 neighborhood motion-consistency score.

use crate::CellBins;

/// Row/column steps of the destination cell and its 8 neighbors.
const NEIGHBORS: [(isize, isize); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Sum of `bins[src][d]` over `dst` and its grid-adjacent cells `d`.
///
/// `grid_size` is `N`. Neighbors outside the grid are skipped; the leftmost
/// column of one row is never a neighbor of the rightmost column of another.
pub fn neighborhood_score(bins: &CellBins, grid_size: usize, src: usize, dst: usize) -> u32 {
    let n = grid_size as isize;
    let row = (dst / grid_size) as isize;
    let col = (dst % grid_size) as isize;
    let counts = bins.row(src);

    let mut score = 0u32;
    for (dr, dc) in NEIGHBORS {
        let r = row + dr;
        let c = col + dc;
        if r < 0 || r >= n || c < 0 || c >= n {
            continue;
        }
        score += counts[(r * n + c) as usize];
    }
    score
}
