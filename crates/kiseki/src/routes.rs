//! HTTP routes: the upload-to-GPX endpoint and a health check.
//!
//! `POST /generate` accepts a multipart form with an `image` file and
//! `lat`/`lon` fields, runs the full pipeline, and answers with a GPX
//! download of the matched route. Handlers are stateless; everything a
//! request needs travels through [`AppState`] or the request itself,
//! and the uploaded bytes live only for the duration of the handler.

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use log::info;

use kiseki_export::{GPX_MIME, GpxMetadata, to_gpx};
use kiseki_match::MatchClient;
use kiseki_pipeline::{
    GeoPath, GeoPoint, Placement, TraceConfig, match_waypoints, project_path, score_route, trace,
};

use crate::error::ApiError;

/// Shared, immutable per-process state.
///
/// Cloned into each handler invocation; requests share nothing mutable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the external map-matching service.
    pub match_client: MatchClient,
    /// Tracing parameters applied to every upload.
    pub trace_config: TraceConfig,
    /// Default ground span when the request does not override it.
    pub span_km: f64,
    /// Cap on waypoints per match request.
    pub max_waypoints: usize,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/generate", post(generate))
        .with_state(state)
}

async fn health() -> &'static str {
    "kiseki server running"
}

/// The parsed `/generate` form.
struct GenerateForm {
    image: Vec<u8>,
    filename: Option<String>,
    lat: f64,
    lon: f64,
    span_km: Option<f64>,
}

async fn generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_form(multipart).await?;

    let placement = Placement {
        center_lat: form.lat,
        center_lon: form.lon,
        span_km: form.span_km.unwrap_or(state.span_km),
    };

    // The trace and projection stages are pure CPU work -- quadratic in
    // the sampled point count -- so they run off the async worker.
    let trace_config = state.trace_config;
    let max_waypoints = state.max_waypoints;
    let image = form.image;
    let (geo_path, waypoints) = tokio::task::spawn_blocking(
        move || -> Result<(GeoPath, Vec<GeoPoint>), ApiError> {
            let traced = trace(&image, &trace_config)?;
            let geo_path = project_path(&traced.path, &placement, traced.dimensions)?;
            let waypoints = match_waypoints(&geo_path, max_waypoints)?;
            Ok((geo_path, waypoints))
        },
    )
    .await
    .map_err(|e| ApiError::Internal(format!("pipeline task failed: {e}")))??;

    // The single suspension point: snap the trace to the road network.
    let matched = state.match_client.match_route(&waypoints).await?;

    let score = score_route(&geo_path, &matched)?;
    info!(
        "generated route: mean error {:.3} km, length {:.2} km",
        score.mean_error_km, score.route_length_km,
    );

    let name = form.filename.as_deref().map(strip_extension);
    let description = format!(
        "matched route, {:.2} km, mean deviation {:.3} km",
        score.route_length_km, score.mean_error_km,
    );
    let gpx = to_gpx(
        &matched.geometry,
        &GpxMetadata {
            name,
            description: Some(&description),
        },
    );

    Ok((
        [
            (header::CONTENT_TYPE, GPX_MIME),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"strava-art.gpx\"",
            ),
        ],
        gpx,
    ))
}

/// Read and validate the multipart form.
///
/// Fails with [`ApiError::InvalidRequest`] -- before any pipeline work --
/// when the image is missing or not PNG/JPEG, or when `lat`/`lon` are
/// missing or non-numeric.
async fn read_form(mut multipart: Multipart) -> Result<GenerateForm, ApiError> {
    let mut image = None;
    let mut filename = None;
    let mut lat = None;
    let mut lon = None;
    let mut span_km = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("image") => {
                match field.content_type() {
                    Some("image/png" | "image/jpeg") => {}
                    other => {
                        return Err(ApiError::InvalidRequest(format!(
                            "image must be image/png or image/jpeg, got {}",
                            other.unwrap_or("no content type"),
                        )));
                    }
                }
                filename = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read image upload: {e}"))
                })?;
                image = Some(bytes.to_vec());
            }
            Some("lat") => lat = Some(read_text(field, "lat").await?),
            Some("lon") => lon = Some(read_text(field, "lon").await?),
            Some("span_km") => span_km = Some(read_text(field, "span_km").await?),
            _ => {} // Unknown fields are ignored.
        }
    }

    let Some(image) = image else {
        return Err(ApiError::InvalidRequest("image file required".to_string()));
    };

    Ok(GenerateForm {
        image,
        filename,
        lat: parse_coordinate("lat", lat)?,
        lon: parse_coordinate("lon", lon)?,
        span_km: span_km.map(|v| parse_coordinate("span_km", Some(v))).transpose()?,
    })
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("failed to read field {name}: {e}")))
}

/// Parse a required numeric form field.
fn parse_coordinate(name: &str, value: Option<String>) -> Result<f64, ApiError> {
    let value = value.ok_or_else(|| ApiError::InvalidRequest("lat & lon required".to_string()))?;
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("{name} must be numeric, got {value:?}")))
}

/// Drop the extension from an uploaded filename for the track name.
fn strip_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(base, _)| base)
}
