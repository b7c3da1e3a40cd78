use serde::{Deserialize, Serialize};

use crate::{GmsError, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Default inlier-threshold scaling factor.
pub const DEFAULT_THRESHOLD_FACTOR: f32 = 0.15;

/// Tunable parameters of the GMS filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmsParams {
    /// Cells per image axis, in `1..=MAX_GRID_SIZE`.
    pub grid_size: usize,
    /// Scales the neighborhood-score threshold; larger keeps fewer matches.
    pub threshold_factor: f32,
}

impl Default for GmsParams {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            threshold_factor: DEFAULT_THRESHOLD_FACTOR,
        }
    }
}

impl GmsParams {
    pub fn validate(&self) -> Result<(), GmsError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(GmsError::InvalidParams(format!(
                "grid_size must be in 1..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !self.threshold_factor.is_finite() || self.threshold_factor < 0.0 {
            return Err(GmsError::InvalidParams(format!(
                "threshold_factor must be finite and non-negative, got {}",
                self.threshold_factor
            )));
        }
        Ok(())
    }
}
