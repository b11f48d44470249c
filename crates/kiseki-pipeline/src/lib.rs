//! kiseki-pipeline: Pure image-to-geo path pipeline (sans-IO).
//!
//! Converts a hand-drawn raster image into an ordered path of WGS-84
//! coordinates through:
//! decode/binarize -> ink sampling -> greedy ordering -> projection,
//! plus the boundary helpers for the external map-matching step:
//! waypoint downsampling and fidelity scoring.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. The HTTP boundary (upload
//! intake, the map-match network call, GPX download) lives in the
//! `kiseki` server crate, `kiseki-match`, and `kiseki-export`.

pub mod binarize;
pub mod downsample;
pub mod order;
pub mod project;
pub mod sample;
pub mod score;
pub mod types;

pub use downsample::{DEFAULT_MAX_WAYPOINTS, match_waypoints};
pub use project::project_path;
pub use score::score_route;
pub use types::{
    Dimensions, GeoPath, GeoPoint, MatchedRoute, PipelineError, PixelPath, PixelPoint, Placement,
    Score, TraceConfig, TraceResult,
};

/// Trace an uploaded image into an ordered pixel path.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP) and a configuration,
/// then produces a [`TraceResult`] containing the ordered path and the
/// binarized image's dimensions. The dimensions are needed by
/// [`project_path`] to normalize pixel coordinates into the placement
/// span.
///
/// # Pipeline steps
///
/// 1. Decode image, grayscale, resize to the working resolution,
///    threshold into a binary grid
/// 2. Strided ink-pixel sampling
/// 3. Greedy nearest-neighbor ordering into a single traced path
///
/// Projection is a separate call ([`project_path`]) because placement
/// comes from the request, not from the image.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized.
/// Returns [`PipelineError::InsufficientInk`] if fewer than 2 ink
/// pixels are found.
pub fn trace(image_bytes: &[u8], config: &TraceConfig) -> Result<TraceResult, PipelineError> {
    // 1. Decode, grayscale, resize, threshold.
    let grid = binarize::decode_and_binarize(image_bytes, config)?;
    let dimensions = Dimensions {
        width: grid.width(),
        height: grid.height(),
    };

    // 2. Strided ink sampling.
    let points = sample::sample_ink(&grid, config.stride)?;

    // 3. Greedy nearest-neighbor ordering.
    let path = order::order_points(&points);

    Ok(TraceResult { path, dimensions })
}
