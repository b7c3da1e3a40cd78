use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{GmsError, GridPhase, ImageSize};

/// Default number of cells per image axis.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Largest accepted grid size. Each phase holds `N⁴` bin counters
/// (4 MiB at `N = 32`).
pub const MAX_GRID_SIZE: usize = 32;

/// An `N×N` partition of one image's extent.
///
/// Cells are indexed row-major: `index = row * N + col`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Cells per axis (`N`).
    pub size: usize,
    /// Cell width in pixels (`width / N`).
    pub cell_width: f32,
    /// Cell height in pixels (`height / N`).
    pub cell_height: f32,
}

impl Grid {
    /// Build an `size × size` grid over `image`.
    pub fn new(image: ImageSize, size: usize) -> Result<Self, GmsError> {
        if image.width == 0 || image.height == 0 {
            return Err(GmsError::DegenerateImage {
                width: image.width,
                height: image.height,
            });
        }
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(GmsError::InvalidParams(format!(
                "grid size must be in 1..={MAX_GRID_SIZE}, got {size}"
            )));
        }
        Ok(Self {
            size,
            cell_width: image.width as f32 / size as f32,
            cell_height: image.height as f32 / size as f32,
        })
    }

    /// Total number of cells (`N²`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// `(row, col)` of `pt` under `phase`, each clamped to `[0, N-1]`.
    ///
    /// Points on or past the image border (which the half-cell shift makes
    /// common) fold into the nearest edge cell.
    #[inline]
    pub fn cell_coords(&self, pt: Point2<f32>, phase: GridPhase) -> (usize, usize) {
        let col = axis_bin(pt.x, phase.ox, self.cell_width, self.size);
        let row = axis_bin(pt.y, phase.oy, self.cell_height, self.size);
        (row, col)
    }

    /// Flat cell index of `pt` under `phase`, always in `0..N²`.
    #[inline]
    pub fn cell_index(&self, pt: Point2<f32>, phase: GridPhase) -> usize {
        let (row, col) = self.cell_coords(pt, phase);
        row * self.size + col
    }
}

fn axis_bin(v: f32, offset: f32, step: f32, n: usize) -> usize {
    let x = ((v + offset * step) / step).floor();
    // `as` saturates and maps NaN to 0.
    let idx = x as isize;
    idx.clamp(0, n as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GRID_PHASES;

    fn grid_640x480() -> Grid {
        Grid::new(ImageSize::new(640, 480), DEFAULT_GRID_SIZE).expect("grid")
    }

    #[test]
    fn cell_size_follows_image_size() {
        let g = grid_640x480();
        assert_eq!(g.cell_width, 64.0);
        assert_eq!(g.cell_height, 48.0);
        assert_eq!(g.cell_count(), 100);
    }

    #[test]
    fn index_is_row_major() {
        let g = grid_640x480();
        let p = Point2::new(64.0 * 3.0 + 1.0, 48.0 * 7.0 + 1.0);
        assert_eq!(g.cell_coords(p, GridPhase::IDENTITY), (7, 3));
        assert_eq!(g.cell_index(p, GridPhase::IDENTITY), 73);
    }

    #[test]
    fn half_cell_offset_shifts_assignment() {
        let g = grid_640x480();
        // 40 px into column 0: crosses into column 1 once shifted by 32 px.
        let p = Point2::new(40.0, 10.0);
        assert_eq!(g.cell_index(p, GRID_PHASES[0]), 0);
        assert_eq!(g.cell_index(p, GRID_PHASES[1]), 1);
        assert_eq!(g.cell_index(p, GRID_PHASES[2]), 0);
        assert_eq!(g.cell_index(p, GRID_PHASES[3]), 1);
    }

    #[test]
    fn border_points_stay_in_range() {
        let g = grid_640x480();
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(640.0, 0.0),
            Point2::new(0.0, 480.0),
            Point2::new(640.0, 480.0),
            Point2::new(639.9, 479.9),
            Point2::new(-5.0, 1000.0),
            Point2::new(f32::NAN, f32::INFINITY),
        ];
        for phase in GRID_PHASES {
            for p in corners {
                assert!(g.cell_index(p, phase) < g.cell_count());
            }
        }
        assert_eq!(g.cell_index(Point2::new(640.0, 480.0), GRID_PHASES[3]), 99);
        assert_eq!(g.cell_index(Point2::new(0.0, 0.0), GRID_PHASES[3]), 0);
    }

    #[test]
    fn rejects_degenerate_images() {
        assert_eq!(
            Grid::new(ImageSize::new(0, 480), 10),
            Err(GmsError::DegenerateImage {
                width: 0,
                height: 480
            })
        );
        assert!(matches!(
            Grid::new(ImageSize::new(640, 480), 0),
            Err(GmsError::InvalidParams(_))
        ));
        assert!(matches!(
            Grid::new(ImageSize::new(640, 480), MAX_GRID_SIZE + 1),
            Err(GmsError::InvalidParams(_))
        ));
        assert!(Grid::new(ImageSize::new(640, 480), MAX_GRID_SIZE).is_ok());
    }
}
