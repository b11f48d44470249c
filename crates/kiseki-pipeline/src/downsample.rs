//! Waypoint downsampling for the map-match request.
//!
//! The external matcher enforces an upper bound on waypoints per
//! request, so the projected path is deterministically thinned before
//! it crosses the wire: keep every `step`-th point starting at index 0,
//! truncate to the cap, and round coordinates to 5 decimal places
//! (≈ 1.1 m at the equator) to bound request size.
//!
//! This is a lossy reduction of the request payload, not the matching
//! algorithm -- snapping to the road network happens entirely in the
//! external service.

use crate::types::{GeoPath, GeoPoint, PipelineError};

/// Decimal places kept on each coordinate sent to the matcher.
const COORD_DECIMALS: i32 = 5;

/// Default cap on waypoints per match request.
///
/// The public OSRM demo server rejects requests beyond a few hundred
/// coordinates; 100 keeps requests comfortably small while preserving
/// shape. Configurable because no single value suits every matcher
/// deployment.
pub const DEFAULT_MAX_WAYPOINTS: usize = 100;

/// Reduce a projected path to at most `max_points` rounded waypoints.
///
/// Keeps indices `0, step, 2·step, …` where
/// `step = ceil(len / max_points)`, truncated to `max_points`, with
/// each coordinate rounded to 5 decimal places. Deterministic; values
/// of `max_points` below 2 are clamped to 2 so the result is always a
/// valid trace.
///
/// # Errors
///
/// Returns [`PipelineError::TooFewWaypoints`] if `path` has fewer than
/// 2 points.
pub fn match_waypoints(
    path: &GeoPath,
    max_points: usize,
) -> Result<Vec<GeoPoint>, PipelineError> {
    if path.len() < 2 {
        return Err(PipelineError::TooFewWaypoints { found: path.len() });
    }

    let max_points = max_points.max(2);
    let step = path.len().div_ceil(max_points);

    Ok(path
        .points()
        .iter()
        .step_by(step)
        .take(max_points)
        .map(|p| GeoPoint::new(round_coord(p.lon), round_coord(p.lat)))
        .collect())
}

fn round_coord(value: f64) -> f64 {
    let factor = 10f64.powi(COORD_DECIMALS);
    (value * factor).round() / factor
}
