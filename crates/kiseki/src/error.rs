//! Request error mapping.
//!
//! Every pipeline or match failure is terminal for its request: the
//! error kind is mapped to a status code and a human-readable message,
//! and no partial result is returned. Nothing is retried here;
//! recovery (a different image, a different placement) is the
//! client's call.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, warn};

use kiseki_match::MatchError;
use kiseki_pipeline::PipelineError;

/// A failed `/generate` request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself was unusable: missing or non-numeric form
    /// fields, missing or wrong-type image. Detected before any
    /// pipeline work begins.
    #[error("{0}")]
    InvalidRequest(String),

    /// A pipeline stage rejected the input.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The external match call failed.
    #[error(transparent)]
    Match(#[from] MatchError),

    /// Unanticipated failure (e.g. a worker task died). Logged with
    /// detail, surfaced generically.
    #[error("internal error")]
    Internal(String),
}

impl ApiError {
    /// Status code for this error kind.
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(e) => match e {
                PipelineError::EmptyInput
                | PipelineError::ImageDecode(_)
                | PipelineError::InvalidPlacement(_) => StatusCode::BAD_REQUEST,
                PipelineError::InsufficientInk { .. }
                | PipelineError::TooFewWaypoints { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::DegenerateGeometry { .. } => StatusCode::BAD_GATEWAY,
            },
            Self::Match(e) => match e {
                MatchError::Transport(_)
                | MatchError::Status { .. }
                | MatchError::Service { .. } => StatusCode::BAD_GATEWAY,
                MatchError::NoMatch => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(detail) => warn!("internal error: {detail}"),
            other if status.is_server_error() => warn!("request failed: {other}"),
            other => debug!("request rejected: {other}"),
        }
        (status, self.to_string()).into_response()
    }
}
