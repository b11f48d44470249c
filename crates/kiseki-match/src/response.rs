//! OSRM match response envelope.
//!
//! Deserializes the service's JSON envelope and selects one candidate
//! matching. The envelope carries a `code` field ("Ok" on success, an
//! error code such as "NoMatch" or "NoSegment" otherwise) and zero or
//! more candidate matchings, each with full-overview GeoJSON geometry,
//! a distance in meters, an optional duration, and an optional
//! confidence value.

use serde::Deserialize;

use kiseki_pipeline::{GeoPath, GeoPoint, MatchedRoute};

use crate::MatchError;

/// Top-level match response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchResponse {
    /// "Ok" on success; an error code otherwise.
    pub code: String,
    /// Human-readable detail accompanying a non-"Ok" code.
    #[serde(default)]
    pub message: Option<String>,
    /// Candidate matchings, best-effort ordered by the service.
    #[serde(default)]
    pub matchings: Vec<Matching>,
}

/// One candidate matching inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Matching {
    /// Matcher confidence in [0, 1], when reported.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Route length in meters.
    pub distance: f64,
    /// Estimated traversal time in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Full-overview GeoJSON geometry.
    pub geometry: Geometry,
}

/// GeoJSON LineString geometry: `[lon, lat]` coordinate pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Ordered route vertices, longitude first.
    pub coordinates: Vec<[f64; 2]>,
}

impl MatchResponse {
    /// Select the best candidate matching from the envelope.
    ///
    /// Picks the highest-confidence matching; candidates without a
    /// confidence value never displace one that has it, and when no
    /// candidate reports confidence the first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Service`] when `code` is not "Ok" and
    /// [`MatchError::NoMatch`] when the envelope carries no matchings.
    pub fn into_matched_route(self) -> Result<MatchedRoute, MatchError> {
        if self.code != "Ok" {
            return Err(MatchError::Service {
                code: self.code,
                message: self.message,
            });
        }
        if self.matchings.is_empty() {
            return Err(MatchError::NoMatch);
        }

        let mut best = 0;
        let mut best_confidence = f64::NEG_INFINITY;
        for (i, m) in self.matchings.iter().enumerate() {
            if let Some(confidence) = m.confidence
                && confidence > best_confidence
            {
                best_confidence = confidence;
                best = i;
            }
        }

        let mut matchings = self.matchings;
        let chosen = matchings.swap_remove(best);
        Ok(MatchedRoute {
            geometry: GeoPath::new(
                chosen
                    .geometry
                    .coordinates
                    .iter()
                    .map(|&[lon, lat]| GeoPoint::new(lon, lat))
                    .collect(),
            ),
            distance_m: chosen.distance,
            duration_s: chosen.duration,
            confidence: chosen.confidence,
        })
    }
}
