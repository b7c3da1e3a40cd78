/// Which keypoint list a putative match indexes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchSide {
    Source,
    Destination,
}

impl std::fmt::Display for MatchSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSide::Source => f.write_str("source"),
            MatchSide::Destination => f.write_str("destination"),
        }
    }
}

/// Precondition violations reported by the GMS filter.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GmsError {
    #[error("degenerate image size {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error(
        "match {match_index} references {side} keypoint {index}, but only {len} keypoints exist"
    )]
    KeypointIndexOutOfRange {
        match_index: usize,
        side: MatchSide,
        index: usize,
        len: usize,
    },
}
