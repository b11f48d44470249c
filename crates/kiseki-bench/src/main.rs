//! kiseki-bench: CLI tool for pipeline parameter experimentation.
//!
//! Runs the offline pipeline stages (decode/binarize, sample, order,
//! project) on a local image with configurable parameters, printing
//! per-stage counts and timings. Useful for:
//!
//! - Tuning threshold, stride, and working resolution for an image
//! - Seeing how density parameters drive the O(n²) ordering cost
//! - Dumping the raw (unmatched) projected path as GPX for inspection
//!
//! No network calls are made; the map-matching step is exercised only
//! by the server.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin kiseki-bench -- \
//!     drawing.png --lat 48.8566 --lon 2.3522 --output raw.gpx
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use kiseki_export::{GpxMetadata, to_gpx};
use kiseki_pipeline::{
    Placement, TraceConfig, binarize, order, project_path, sample,
};

/// Pipeline parameter experimentation and diagnostics for kiseki.
#[derive(Parser)]
#[command(name = "kiseki-bench", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Center latitude for projection.
    #[arg(long)]
    lat: f64,

    /// Center longitude for projection.
    #[arg(long)]
    lon: f64,

    /// Ground span in kilometers.
    #[arg(long, default_value_t = Placement::DEFAULT_SPAN_KM)]
    span_km: f64,

    /// Binarization threshold (0-255).
    #[arg(long, default_value_t = TraceConfig::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Sampling stride.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_STRIDE)]
    stride: u32,

    /// Working resolution cap; 0 disables resizing.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_WORKING_RESOLUTION)]
    working_resolution: u32,

    /// Write the raw projected path (unmatched) as GPX to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let bytes = std::fs::read(&cli.image_path)
        .map_err(|e| format!("reading {}: {e}", cli.image_path.display()))?;
    println!("input: {} ({} bytes)", cli.image_path.display(), bytes.len());

    let config = TraceConfig {
        threshold: cli.threshold,
        stride: cli.stride,
        working_resolution: (cli.working_resolution > 0).then_some(cli.working_resolution),
    };

    let start = Instant::now();
    let grid = binarize::decode_and_binarize(&bytes, &config).map_err(|e| e.to_string())?;
    println!(
        "binarize: {}x{} grid in {:.1?}",
        grid.width(),
        grid.height(),
        start.elapsed(),
    );

    let start = Instant::now();
    let points = sample::sample_ink(&grid, config.stride).map_err(|e| e.to_string())?;
    println!(
        "sample:   {} ink points (stride {}) in {:.1?}",
        points.len(),
        config.stride.max(1),
        start.elapsed(),
    );

    let start = Instant::now();
    let path = order::order_points(&points);
    println!("order:    {} point path in {:.1?}", path.len(), start.elapsed());

    let placement = Placement {
        center_lat: cli.lat,
        center_lon: cli.lon,
        span_km: cli.span_km,
    };
    let dimensions = kiseki_pipeline::Dimensions {
        width: grid.width(),
        height: grid.height(),
    };
    let start = Instant::now();
    let geo = project_path(&path, &placement, dimensions).map_err(|e| e.to_string())?;
    println!(
        "project:  {} geo points around ({}, {}) spanning {} km in {:.1?}",
        geo.len(),
        cli.lat,
        cli.lon,
        cli.span_km,
        start.elapsed(),
    );

    if let Some(output) = &cli.output {
        let name = cli
            .image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        let gpx = to_gpx(
            &geo,
            &GpxMetadata {
                name: name.as_deref(),
                description: Some("raw traced path (not map-matched)"),
            },
        );
        std::fs::write(output, &gpx).map_err(|e| format!("writing {}: {e}", output.display()))?;
        println!("wrote raw path GPX to {}", output.display());
    }

    Ok(())
}
