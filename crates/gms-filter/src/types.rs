use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A detected feature location in one image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Pixel position `(x, y)`.
    pub position: Point2<f32>,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point2::new(x, y),
        }
    }
}

/// A tentative correspondence between a source and a destination keypoint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PutativeMatch {
    /// Index into the source (first image) keypoint list.
    pub src_idx: usize,
    /// Index into the destination (second image) keypoint list.
    pub dst_idx: usize,
    /// Descriptor distance; carried through untouched.
    #[serde(default)]
    pub distance: f32,
}

impl PutativeMatch {
    pub fn new(src_idx: usize, dst_idx: usize, distance: f32) -> Self {
        Self {
            src_idx,
            dst_idx,
            distance,
        }
    }
}

/// Image extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
