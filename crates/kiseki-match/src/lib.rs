//! kiseki-match: OSRM map-matching client.
//!
//! The boundary adapter between the pure pipeline and the external
//! road-network service: builds the match request from downsampled
//! waypoints, parses the response envelope, and selects the best
//! candidate matching. No matching logic lives here -- the network
//! search and snapping are the external service's job.

pub mod client;
pub mod response;

pub use client::{DEFAULT_OSRM_URL, DEFAULT_PROFILE, MatchClient};
pub use response::{Geometry, MatchResponse, Matching};

/// Errors from the map-matching call.
///
/// All are terminal for the request; there is no retry policy.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The service was unreachable or the connection failed mid-flight.
    #[error("match service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status and no
    /// parseable error envelope.
    #[error("match service returned HTTP {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// The service answered with an error code in its envelope.
    #[error("match service error {code}: {}", message.as_deref().unwrap_or("no detail"))]
    Service {
        /// Service error code (e.g. "NoMatch", "NoSegment").
        code: String,
        /// Human-readable detail, when provided.
        message: Option<String>,
    },

    /// The service found no plausible route for the trace.
    #[error("no matching route found for the trace")]
    NoMatch,
}
