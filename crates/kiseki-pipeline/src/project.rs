//! Pixel-space to WGS-84 projection.
//!
//! Uses a local-flat equirectangular approximation: one degree of
//! latitude spans a fixed 111.32 km, one degree of longitude spans
//! 111.32·cos(latitude) km. This is a bounded-validity design choice --
//! accurate for spans of a few to tens of kilometers, increasingly
//! wrong as the span approaches Earth-curvature scale. Strava art
//! lives comfortably inside that bound.
//!
//! Image y grows downward while latitude grows upward, so the vertical
//! axis is inverted during projection. Omitting that inversion mirrors
//! the drawing north-south; it has a dedicated test.

use crate::types::{Dimensions, GeoPath, GeoPoint, PipelineError, PixelPath, Placement};

/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEG_LAT: f64 = 111.32;

/// Project an ordered pixel path onto WGS-84 coordinates.
///
/// The image rectangle is mapped to a ground rectangle `span_km` wide,
/// centered on the placement's center. Point order and cardinality are
/// preserved 1:1. Pure function, no side effects.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidPlacement`] when `dimensions` has a
/// zero axis, `span_km` is non-positive or non-finite, or the center
/// coordinates are non-finite.
pub fn project_path(
    path: &PixelPath,
    placement: &Placement,
    dimensions: Dimensions,
) -> Result<GeoPath, PipelineError> {
    if dimensions.width == 0 || dimensions.height == 0 {
        return Err(PipelineError::InvalidPlacement(format!(
            "image dimensions must be positive, got {}x{}",
            dimensions.width, dimensions.height,
        )));
    }
    if !placement.center_lat.is_finite() || !placement.center_lon.is_finite() {
        return Err(PipelineError::InvalidPlacement(
            "center coordinates must be finite".to_string(),
        ));
    }
    if !placement.span_km.is_finite() || placement.span_km <= 0.0 {
        return Err(PipelineError::InvalidPlacement(format!(
            "span_km must be positive and finite, got {}",
            placement.span_km,
        )));
    }

    let km_per_deg_lon = KM_PER_DEG_LAT * placement.center_lat.to_radians().cos();
    let span_lat = placement.span_km / KM_PER_DEG_LAT;
    let span_lon = placement.span_km / km_per_deg_lon;

    let width = f64::from(dimensions.width);
    let height = f64::from(dimensions.height);

    let points = path
        .points()
        .iter()
        .map(|p| {
            let lon = (f64::from(p.x) / width - 0.5).mul_add(span_lon, placement.center_lon);
            // Inverted: y = 0 (image top) maps to the highest latitude.
            let lat = (0.5 - f64::from(p.y) / height).mul_add(span_lat, placement.center_lat);
            GeoPoint::new(lon, lat)
        })
        .collect();

    Ok(GeoPath::new(points))
}
