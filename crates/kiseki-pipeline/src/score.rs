//! Fidelity scoring: how well did the matched route preserve the shape?
//!
//! For every point of the original projected path, measures the
//! distance to the nearest point on the matched route's polyline, then
//! reports the mean. A route that follows the drawing closely scores
//! near zero; detours the road network forced onto the route push the
//! mean up.
//!
//! Every distance this module reports is in kilometers -- the haversine
//! meters from the closest-point measurement and the matcher's reported
//! route length are both converted at the edge, never mixed.

use geo::algorithm::Distance;
use geo::{Closest, ClosestPoint, Haversine, LineString, Point};

use crate::types::{GeoPath, MatchedRoute, PipelineError, Score};

/// Score a matched route against the original projected path.
///
/// `mean_error_km` is the mean over all original points of the
/// great-circle distance to the nearest point on the matched polyline.
/// `route_length_km` passes through the matcher's reported distance,
/// converted to kilometers -- it is not recomputed from the geometry.
///
/// # Errors
///
/// Returns [`PipelineError::DegenerateGeometry`] if the matched
/// geometry has fewer than 2 vertices -- a single-point "line" has no
/// defined nearest-point projection.
pub fn score_route(original: &GeoPath, matched: &MatchedRoute) -> Result<Score, PipelineError> {
    let vertices = matched.geometry.points();
    if vertices.len() < 2 {
        return Err(PipelineError::DegenerateGeometry {
            vertices: vertices.len(),
        });
    }

    let line = LineString::from(
        vertices
            .iter()
            .map(|g| (g.lon, g.lat))
            .collect::<Vec<(f64, f64)>>(),
    );

    let mut total_km = 0.0;
    for g in original.points() {
        let point = Point::new(g.lon, g.lat);
        let nearest = match line.closest_point(&point) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => p,
            Closest::Indeterminate => {
                return Err(PipelineError::DegenerateGeometry {
                    vertices: vertices.len(),
                });
            }
        };
        total_km += Haversine.distance(point, nearest) / 1000.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean_error_km = if original.is_empty() {
        0.0
    } else {
        total_km / original.len() as f64
    };

    Ok(Score {
        mean_error_km,
        route_length_km: matched.distance_m / 1000.0,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::GeoPoint;

    fn path(coords: &[(f64, f64)]) -> GeoPath {
        GeoPath::new(
            coords
                .iter()
                .map(|&(lon, lat)| GeoPoint::new(lon, lat))
                .collect(),
        )
    }

    fn route(coords: &[(f64, f64)], distance_m: f64) -> MatchedRoute {
        MatchedRoute {
            geometry: path(coords),
            distance_m,
            duration_s: None,
            confidence: None,
        }
    }

    #[test]
    fn identical_geometry_scores_zero_error() {
        let coords = [(2.35, 48.85), (2.36, 48.86), (2.37, 48.85)];
        let original = path(&coords);
        let matched = route(&coords, 2500.0);

        let score = score_route(&original, &matched).unwrap();
        assert!(
            score.mean_error_km < 1e-9,
            "identical geometry must score ~0, got {}",
            score.mean_error_km,
        );
    }

    #[test]
    fn route_length_is_passed_through_in_km() {
        let coords = [(0.0, 0.0), (0.01, 0.0)];
        let matched = route(&coords, 2500.0);
        let score = score_route(&path(&coords), &matched).unwrap();
        assert!((score.route_length_km - 2.5).abs() < 1e-12);
    }

    #[test]
    fn offset_point_contributes_its_distance() {
        // Matched route runs along the equator; the single original
        // point sits 0.01° of latitude (≈ 1.11 km) north of it.
        let original = path(&[(0.005, 0.01)]);
        let matched = route(&[(0.0, 0.0), (0.01, 0.0)], 1113.0);

        let score = score_route(&original, &matched).unwrap();
        assert!(
            (score.mean_error_km - 1.11).abs() < 0.01,
            "expected ~1.11 km, got {}",
            score.mean_error_km,
        );
    }

    #[test]
    fn error_is_mean_over_original_points() {
        // One point on the line (0 km), one point ~1.11 km off: the
        // mean is half the single-point error.
        let original = path(&[(0.005, 0.0), (0.005, 0.01)]);
        let matched = route(&[(0.0, 0.0), (0.01, 0.0)], 1113.0);

        let score = score_route(&original, &matched).unwrap();
        assert!(
            (score.mean_error_km - 0.555).abs() < 0.01,
            "expected ~0.555 km, got {}",
            score.mean_error_km,
        );
    }

    #[test]
    fn nearest_point_uses_segment_interior_not_just_vertices() {
        // The original point projects onto the middle of the segment,
        // far from either endpoint. Error must reflect the
        // perpendicular distance, not the vertex distance.
        let original = path(&[(0.05, 0.001)]);
        let matched = route(&[(0.0, 0.0), (0.1, 0.0)], 11130.0);

        let score = score_route(&original, &matched).unwrap();
        // Perpendicular: ~0.111 km. Distance to nearest vertex: ~5.6 km.
        assert!(
            score.mean_error_km < 0.15,
            "expected perpendicular distance, got {} km",
            score.mean_error_km,
        );
    }

    #[test]
    fn single_vertex_geometry_is_degenerate() {
        let original = path(&[(0.0, 0.0), (0.01, 0.0)]);
        let matched = route(&[(0.0, 0.0)], 0.0);

        let result = score_route(&original, &matched);
        assert!(matches!(
            result,
            Err(PipelineError::DegenerateGeometry { vertices: 1 }),
        ));
    }

    #[test]
    fn empty_geometry_is_degenerate() {
        let original = path(&[(0.0, 0.0), (0.01, 0.0)]);
        let matched = route(&[], 0.0);

        let result = score_route(&original, &matched);
        assert!(matches!(
            result,
            Err(PipelineError::DegenerateGeometry { vertices: 0 }),
        ));
    }
}
