//! JSON input/output formats of the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use gms_filter::{
    GmsError, GmsParams, GmsResult, ImageSize, Keypoint, PhaseReport, PutativeMatch,
};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Gms(#[from] GmsError),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Correspondences produced by an external detector/matcher.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrespondenceFile {
    pub image1: ImageSize,
    pub image2: ImageSize,
    pub keypoints1: Vec<Keypoint>,
    pub keypoints2: Vec<Keypoint>,
    pub matches: Vec<PutativeMatch>,
}

#[derive(Debug, Serialize)]
pub struct FilterOutput {
    pub input_matches: usize,
    pub matches: Vec<PutativeMatch>,
    pub inliers: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PhaseReport>>,
}

impl FilterOutput {
    pub fn new(input_matches: usize, result: GmsResult, with_report: bool) -> Self {
        Self {
            input_matches,
            matches: result.matches,
            inliers: result.inliers,
            phases: with_report.then_some(result.phases),
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
pub fn load_correspondences(path: &Path) -> Result<CorrespondenceFile, CliError> {
    read_json(path)
}

pub fn load_params(path: &Path) -> Result<GmsParams, CliError> {
    read_json(path)
}

/// Write `output` as pretty JSON to `path`, or to stdout when `None`.
pub fn write_output(path: Option<&Path>, output: &FilterOutput) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(output)?;
    match path {
        Some(path) => fs::write(path, json).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
