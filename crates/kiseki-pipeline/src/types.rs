//! Shared types for the kiseki image-to-geo pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference the
/// binarized pixel grid without depending on `image` directly.
pub use image::GrayImage;

/// A pixel coordinate in image space.
///
/// `x` grows rightward, `y` grows downward, both bounded by the image
/// dimensions. Coordinates are integral raster cells, so squared
/// distances are computed exactly in `u64` and nearest-neighbor
/// tie-breaking never depends on floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal position (pixels from the left edge).
    pub x: u32,
    /// Vertical position (pixels from the top edge).
    pub y: u32,
}

impl PixelPoint {
    /// Create a new pixel point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Exact squared Euclidean distance to another point.
    ///
    /// Avoids the square root since only relative order matters to the
    /// greedy ordering scan.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

/// An ordered sequence of pixel points forming a traced path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPath(Vec<PixelPoint>);

impl PixelPath {
    /// Create a new path from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<PixelPoint>) -> Self {
        Self(points)
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the path.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&PixelPoint> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PixelPoint> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[PixelPoint] {
        &self.0
    }

    /// Consumes the path and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<PixelPoint> {
        self.0
    }
}

/// A WGS-84 coordinate in decimal degrees.
///
/// Stored longitude-first to match the order the map-matching wire
/// format uses. Latitude/longitude ranges are not independently
/// validated; the caller supplies a sane center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in decimal degrees, east positive.
    pub lon: f64,
    /// Latitude in decimal degrees, north positive.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// An ordered sequence of geographic points.
///
/// When produced by projection it is a 1:1 positional image of a
/// [`PixelPath`] -- never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPath(Vec<GeoPoint>);

impl GeoPath {
    /// Create a new geographic path from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the path.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    /// Consumes the path and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A route returned by the external map-matching service.
///
/// Owned transiently by one request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRoute {
    /// Ordered vertices of the snapped route geometry.
    pub geometry: GeoPath,
    /// Route length in meters, as reported by the matcher.
    pub distance_m: f64,
    /// Estimated traversal time in seconds, when the matcher reports one.
    pub duration_s: Option<f64>,
    /// Matcher confidence in [0, 1], when reported. Used to pick among
    /// multiple candidate matchings.
    pub confidence: Option<f64>,
}

/// How faithfully a matched route preserves the traced shape.
///
/// Pure computed value; all distances are kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Mean distance from each traced point to the nearest point on the
    /// matched route, in kilometers. Lower is better fidelity.
    pub mean_error_km: f64,
    /// Length of the matched route in kilometers (as reported by the
    /// matcher, not recomputed).
    pub route_length_km: f64,
}

/// Configuration for tracing ink pixels out of an uploaded image.
///
/// The source material this pipeline was built from disagreed on
/// sampling density between revisions, so density is configurable here
/// rather than hardcoded: `stride` thins the scan directly, while
/// `working_resolution` caps the decoded image size before sampling.
/// Both bound the point count that the O(n²) ordering stage has to chew
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Grayscale threshold: pixels at or below this value after
    /// binarization are ink.
    pub threshold: u8,

    /// Visit every `stride`-th row and column when sampling.
    /// A value of 0 is treated as 1.
    pub stride: u32,

    /// When set, resize the decoded image so its longest axis is at
    /// most this many pixels before sampling. `None` disables resizing.
    pub working_resolution: Option<u32>,
}

impl TraceConfig {
    /// Default binarization threshold (mid-gray).
    pub const DEFAULT_THRESHOLD: u8 = 128;
    /// Default sampling stride (every other pixel).
    pub const DEFAULT_STRIDE: u32 = 2;
    /// Default working resolution cap in pixels.
    pub const DEFAULT_WORKING_RESOLUTION: u32 = 256;
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            stride: Self::DEFAULT_STRIDE,
            working_resolution: Some(Self::DEFAULT_WORKING_RESOLUTION),
        }
    }
}

/// Where on Earth the traced shape is placed, and how large it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Latitude of the shape's center in decimal degrees.
    pub center_lat: f64,
    /// Longitude of the shape's center in decimal degrees.
    pub center_lon: f64,
    /// Width of the shape on the ground in kilometers.
    pub span_km: f64,
}

impl Placement {
    /// Default ground span in kilometers.
    pub const DEFAULT_SPAN_KM: f64 = 10.0;

    /// Create a placement centered at the given coordinates with the
    /// default span.
    #[must_use]
    pub const fn new(center_lat: f64, center_lon: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            span_km: Self::DEFAULT_SPAN_KM,
        }
    }
}

/// Result of tracing an image into an ordered pixel path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResult {
    /// The ordered traced path in pixel coordinates.
    pub path: PixelPath,

    /// Dimensions of the (possibly resized) binarized image.
    ///
    /// Projection needs these to normalize pixel coordinates into the
    /// placement span.
    pub dimensions: Dimensions,
}

/// Errors that can occur in the image-to-geo pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The image contains too few ink pixels to form a path.
    #[error("image has no extractable shape: found {found} ink pixel(s), need at least 2")]
    InsufficientInk {
        /// Number of ink pixels actually found.
        found: usize,
    },

    /// Placement or image parameters are unusable for projection.
    #[error("invalid projection parameters: {0}")]
    InvalidPlacement(String),

    /// The projected path is too short to build a match request from.
    #[error("path has {found} point(s), need at least 2 to request a match")]
    TooFewWaypoints {
        /// Number of points actually present.
        found: usize,
    },

    /// The matched geometry has too few vertices to measure against.
    #[error("matched geometry has {vertices} vertex(es), need at least 2 to score")]
    DegenerateGeometry {
        /// Number of vertices in the matched geometry.
        vertices: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- PixelPoint tests ---

    #[test]
    fn pixel_distance_squared_is_exact() {
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
    }

    #[test]
    fn pixel_distance_squared_to_self_is_zero() {
        let p = PixelPoint::new(7, 11);
        assert_eq!(p.distance_squared(p), 0);
    }

    #[test]
    fn pixel_distance_squared_is_symmetric_for_large_images() {
        let a = PixelPoint::new(12, 8000);
        let b = PixelPoint::new(7990, 3);
        assert_eq!(a.distance_squared(b), b.distance_squared(a));
        assert_eq!(a.distance_squared(b), 7978 * 7978 + 7997 * 7997);
    }

    // --- Path tests ---

    #[test]
    fn pixel_path_accessors() {
        let path = PixelPath::new(vec![
            PixelPoint::new(1, 2),
            PixelPoint::new(3, 4),
            PixelPoint::new(5, 6),
        ]);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert_eq!(path.first(), Some(&PixelPoint::new(1, 2)));
        assert_eq!(path.last(), Some(&PixelPoint::new(5, 6)));
    }

    #[test]
    fn empty_paths() {
        let pixel = PixelPath::new(vec![]);
        assert!(pixel.is_empty());
        assert!(pixel.first().is_none());

        let geo = GeoPath::new(vec![]);
        assert!(geo.is_empty());
        assert_eq!(geo.len(), 0);
    }

    #[test]
    fn geo_path_into_points_returns_owned_vec() {
        let points = vec![GeoPoint::new(2.35, 48.85), GeoPoint::new(2.36, 48.86)];
        let path = GeoPath::new(points.clone());
        assert_eq!(path.into_points(), points);
    }

    // --- Config tests ---

    #[test]
    fn trace_config_defaults() {
        let config = TraceConfig::default();
        assert_eq!(config.threshold, 128);
        assert_eq!(config.stride, 2);
        assert_eq!(config.working_resolution, Some(256));
    }

    #[test]
    fn placement_new_uses_default_span() {
        let placement = Placement::new(51.5, -0.12);
        assert!((placement.span_km - Placement::DEFAULT_SPAN_KM).abs() < f64::EPSILON);
    }

    // --- Error display tests ---

    #[test]
    fn insufficient_ink_display_includes_count() {
        let err = PipelineError::InsufficientInk { found: 1 };
        assert_eq!(
            err.to_string(),
            "image has no extractable shape: found 1 ink pixel(s), need at least 2",
        );
    }

    #[test]
    fn invalid_placement_display() {
        let err = PipelineError::InvalidPlacement("span_km must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid projection parameters: span_km must be positive",
        );
    }

    // --- Serde round-trip tests ---

    #[test]
    fn geo_path_serde_round_trip() {
        let path = GeoPath::new(vec![
            GeoPoint::new(-0.1278, 51.5074),
            GeoPoint::new(-0.1290, 51.5080),
        ]);
        let json = serde_json::to_string(&path).unwrap();
        let deserialized: GeoPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, deserialized);
    }

    #[test]
    fn trace_config_serde_round_trip() {
        let config = TraceConfig {
            threshold: 100,
            stride: 3,
            working_resolution: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: TraceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
