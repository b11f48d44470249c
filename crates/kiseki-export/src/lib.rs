//! kiseki-export: Pure format serializers (sans-IO)
//!
//! Converts matched routes into output formats. Currently supports
//! GPX 1.1, the track-interchange format Strava and most GPS tools
//! consume.

pub mod gpx;

pub use gpx::{GPX_MIME, GpxMetadata, to_gpx};
