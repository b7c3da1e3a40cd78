//! Grid-based Motion Statistics (GMS) filtering of putative feature matches.
//!
//! True correspondences move coherently: matches leaving one coarse image
//! region tend to land together in one region of the other image, while
//! false matches scatter. GMS partitions both images into an `N×N` grid,
//! counts matches per `(source cell, destination cell)` pair, and keeps the
//! pairs whose 3×3 destination neighborhood collects clearly more matches
//! than scattering would. The grid is evaluated under four half-cell phases
//! and the survivors are merged.
//!
//! The crate only needs keypoint positions, the putative matches and the two
//! image sizes. Detection and descriptor matching happen elsewhere.
//!
//! ```
//! use gms_filter::{GmsFilter, GmsParams, ImageSize, Keypoint, PutativeMatch};
//!
//! # fn main() -> Result<(), gms_filter::GmsError> {
//! let size = ImageSize::new(640, 480);
//! let kp1: Vec<Keypoint> = (0..20).map(|i| Keypoint::new(100.0 + i as f32, 100.0)).collect();
//! let kp2: Vec<Keypoint> = (0..20).map(|i| Keypoint::new(140.0 + i as f32, 110.0)).collect();
//! let matches: Vec<PutativeMatch> = (0..20).map(|i| PutativeMatch::new(i, i, 0.0)).collect();
//!
//! let filter = GmsFilter::new(GmsParams::default())?;
//! let inliers = filter.filter(size, size, &kp1, &kp2, &matches)?;
//! assert_eq!(inliers.len(), 20);
//! # Ok(())
//! # }
//! ```

mod error;
mod filter;
mod grid;
mod params;
mod phase;
mod score;
mod select;
mod types;
mod votes;

pub use error::{GmsError, MatchSide};
pub use filter::{filter_matches, GmsFilter, GmsResult, PhaseReport};
pub use grid::{Grid, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
pub use params::{GmsParams, DEFAULT_THRESHOLD_FACTOR};
pub use phase::{GridPhase, GRID_PHASES, PHASE_COUNT};
pub use score::neighborhood_score;
pub use select::{dominant_destination, inlier_threshold, select_phase_inliers, PhaseSelection};
pub use types::{ImageSize, Keypoint, PutativeMatch};
pub use votes::{CellBins, CellMatch, PhaseVotes};
