//! kiseki server: upload a drawing, download a map-matched GPX route.
//!
//! Accepts a PNG or JPEG upload plus a center latitude/longitude,
//! traces the drawing into an ordered path, projects it onto the map
//! around the center, snaps it to the road network via an external
//! OSRM-compatible service, and returns the snapped route as a GPX
//! download.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin kiseki -- [OPTIONS]
//! curl -F image=@heart.png -F lat=48.8566 -F lon=2.3522 \
//!     http://127.0.0.1:3000/generate -o heart.gpx
//! ```

use std::net::SocketAddr;

use clap::Parser;
use log::info;

use kiseki_match::MatchClient;
use kiseki_pipeline::{DEFAULT_MAX_WAYPOINTS, Placement, TraceConfig};

mod error;
mod routes;

use routes::AppState;

/// Turn hand-drawn images into map-matched GPS routes.
#[derive(Parser)]
#[command(name = "kiseki", version)]
struct Args {
    /// Socket address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Base URL of the OSRM-compatible match service.
    #[arg(long, default_value = kiseki_match::DEFAULT_OSRM_URL)]
    osrm_url: String,

    /// Routing profile used for matching (e.g. foot, bike, car).
    #[arg(long, default_value = kiseki_match::DEFAULT_PROFILE)]
    profile: String,

    /// Default ground span of the drawing in kilometers. Requests may
    /// override per-upload via the span_km form field.
    #[arg(long, default_value_t = Placement::DEFAULT_SPAN_KM)]
    span_km: f64,

    /// Binarization threshold (0-255); pixels at or below it are ink.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Sample every Nth row and column of the binarized image.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_STRIDE)]
    stride: u32,

    /// Resize uploads so the longest axis is at most this many pixels
    /// before sampling. 0 disables resizing.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_WORKING_RESOLUTION)]
    working_resolution: u32,

    /// Maximum waypoints sent to the match service per request.
    #[arg(long, default_value_t = DEFAULT_MAX_WAYPOINTS)]
    max_waypoints: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let state = AppState {
        match_client: MatchClient::new(&args.osrm_url, &args.profile),
        trace_config: TraceConfig {
            threshold: args.threshold,
            stride: args.stride,
            working_resolution: (args.working_resolution > 0).then_some(args.working_resolution),
        },
        span_km: args.span_km,
        max_waypoints: args.max_waypoints,
    };

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(
        "listening on http://{} (match service: {})",
        args.bind, args.osrm_url,
    );
    axum::serve(listener, app).await?;
    Ok(())
}
