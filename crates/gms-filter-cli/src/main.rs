//! `gms-filter`: reject outliers from a JSON file of putative matches.

mod io;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use gms_filter::{GmsFilter, GmsParams};
use log::{info, LevelFilter};

use crate::io::{load_correspondences, load_params, write_output, CliError, FilterOutput};
use crate::logging::init_logging;

#[derive(Debug, Parser)]
#[command(name = "gms-filter", version, about = "Grid-based motion statistics match filter")]
struct Args {
    /// Correspondence file (image sizes, keypoints, putative matches).
    #[arg(short, long)]
    input: PathBuf,
    /// Output JSON path; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON file with filter parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the number of grid cells per axis.
    #[arg(long)]
    grid_size: Option<usize>,
    /// Override the inlier threshold scaling factor.
    #[arg(long)]
    threshold_factor: Option<f32>,
    /// Include per-phase statistics in the output.
    #[arg(long)]
    report: bool,
    /// Log level (off, error, warn, info, debug, trace); `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();

    init_logging(args.log_level)?;

    run(&args)
}

fn resolve_params(args: &Args) -> Result<GmsParams, CliError> {
    let mut params = match &args.config {
        Some(path) => load_params(path)?,
        None => GmsParams::default(),
    };
    if let Some(grid_size) = args.grid_size {
        params.grid_size = grid_size;
    }
    if let Some(threshold_factor) = args.threshold_factor {
        params.threshold_factor = threshold_factor;
    }
    Ok(params)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run(args: &Args) -> Result<(), CliError> {
    let params = resolve_params(args)?;
    let input = load_correspondences(&args.input)?;
    info!(
        "loaded {} + {} keypoints, {} matches",
        input.keypoints1.len(),
        input.keypoints2.len(),
        input.matches.len()
    );

    let filter = GmsFilter::new(params)?;
    let result = filter.filter_with_report(
        input.image1,
        input.image2,
        &input.keypoints1,
        &input.keypoints2,
        &input.matches,
    )?;

    let output = FilterOutput::new(input.matches.len(), result, args.report);
    write_output(args.output.as_deref(), &output)
}
