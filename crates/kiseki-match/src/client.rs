//! HTTP client for an OSRM-compatible match service.
//!
//! Builds the match request URL from pre-downsampled waypoints and
//! consumes the response envelope. The snapping itself happens
//! entirely in the external service; a failed call is terminal for the
//! request -- no retry, no backoff.

use log::{debug, info};

use kiseki_pipeline::{GeoPoint, MatchedRoute};

use crate::MatchError;
use crate::response::MatchResponse;

/// Public OSRM demo server.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// Default routing profile. Strava art is usually walked.
pub const DEFAULT_PROFILE: &str = "foot";

/// Handle to an OSRM-compatible map-matching service.
///
/// Constructed once at process start and passed into request handlers
/// as an explicit collaborator -- no module-level singletons. Cloning is
/// cheap; the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct MatchClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl MatchClient {
    /// Create a client for the service at `base_url` using the given
    /// routing profile. A trailing slash on `base_url` is tolerated.
    #[must_use]
    pub fn new(base_url: &str, profile: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            profile: profile.to_owned(),
        }
    }

    /// Format waypoints as the service's path segment:
    /// `lon,lat;lon,lat;…`.
    #[must_use]
    pub fn coordinates_segment(waypoints: &[GeoPoint]) -> String {
        waypoints
            .iter()
            .map(|p| format!("{},{}", p.lon, p.lat))
            .collect::<Vec<String>>()
            .join(";")
    }

    /// Full request URL for the given waypoints, asking for
    /// full-overview GeoJSON geometry.
    #[must_use]
    pub fn match_url(&self, waypoints: &[GeoPoint]) -> String {
        format!(
            "{}/match/v1/{}/{}?geometries=geojson&overview=full",
            self.base_url,
            self.profile,
            Self::coordinates_segment(waypoints),
        )
    }

    /// Snap a waypoint sequence to the road network.
    ///
    /// Sends one GET request and selects the best candidate matching
    /// from the response. This is the pipeline's single suspension
    /// point; when the caller's task is cancelled the pending request
    /// is dropped with it.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Transport`] when the service is
    /// unreachable, [`MatchError::Status`] on a non-success HTTP status
    /// without a parseable envelope, [`MatchError::Service`] when the
    /// envelope code is not "Ok", and [`MatchError::NoMatch`] when no
    /// matching is returned.
    pub async fn match_route(&self, waypoints: &[GeoPoint]) -> Result<MatchedRoute, MatchError> {
        let url = self.match_url(waypoints);
        debug!("match request: {} waypoints -> {url}", waypoints.len());

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // Error statuses usually still carry the envelope with a
            // service error code; surface that when present.
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<MatchResponse>(&body)
                && envelope.code != "Ok"
            {
                return Err(MatchError::Service {
                    code: envelope.code,
                    message: envelope.message,
                });
            }
            return Err(MatchError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: MatchResponse = response.json().await?;
        let route = envelope.into_matched_route()?;
        info!(
            "matched route: {:.2} km over {} vertices (confidence {:?})",
            route.distance_m / 1000.0,
            route.geometry.len(),
            route.confidence,
        );
        Ok(route)
    }
}
