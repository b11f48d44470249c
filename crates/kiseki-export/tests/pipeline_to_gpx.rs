//! Integration test: trace a synthetic drawing through the full
//! offline pipeline and export the projected path to GPX.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use kiseki_pipeline::{Placement, TraceConfig, project_path, trace};

/// Draw a diagonal stroke on a white canvas and encode it as PNG.
fn diagonal_stroke_png(size: u32) -> Vec<u8> {
    let mut img = image::GrayImage::from_pixel(size, size, image::Luma([255]));
    for i in 0..size {
        img.put_pixel(i, i, image::Luma([0]));
    }
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::L8,
    )
    .unwrap();
    buf
}

#[test]
fn diagonal_stroke_pipeline_to_gpx() {
    let png = diagonal_stroke_png(32);

    let config = TraceConfig {
        stride: 1,
        working_resolution: None,
        ..TraceConfig::default()
    };
    let result = trace(&png, &config).expect("trace should succeed");
    assert_eq!(result.path.len(), 32, "one point per diagonal pixel");

    // Place the drawing around central Paris at the default span.
    let geo = project_path(
        &result.path,
        &Placement::new(48.8566, 2.3522),
        result.dimensions,
    )
    .expect("projection should succeed");
    assert_eq!(geo.len(), result.path.len());

    let metadata = kiseki_export::GpxMetadata {
        name: Some("diagonal"),
        description: Some("integration test stroke"),
    };
    let gpx = kiseki_export::to_gpx(&geo, &metadata);

    // Basic structural assertions.
    assert!(gpx.contains("<gpx version=\"1.1\""));
    assert!(gpx.contains("<name>diagonal</name>"));
    assert_eq!(gpx.matches("<trkpt").count(), 32);
    assert!(gpx.trim_end().ends_with("</gpx>"));

    // The stroke runs top-left to bottom-right, so latitude must
    // decrease monotonically along the track while longitude increases.
    let lats: Vec<f64> = gpx
        .lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("<trkpt lat=\"")?;
            let end = rest.find('"')?;
            rest[..end].parse().ok()
        })
        .collect();
    assert_eq!(lats.len(), 32);
    for pair in lats.windows(2) {
        assert!(pair[0] > pair[1], "latitude must decrease down the stroke");
    }
}
