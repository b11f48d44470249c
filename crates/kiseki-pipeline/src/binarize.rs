//! Image decoding and binarization.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the
//! binary pixel grid the sampler consumes: decode, grayscale, an
//! optional resize down to a working resolution, then a hard threshold.
//!
//! The resize cap exists because ordering cost is quadratic in the
//! sampled point count; a 4000-px upload would otherwise produce a
//! point cloud the ordering stage cannot traverse in request time.

use image::GrayImage;
use image::imageops::FilterType;
use imageproc::contrast::{ThresholdType, threshold};

use crate::types::{PipelineError, TraceConfig};

/// Pixel value of an ink (foreground) cell in the binarized grid.
///
/// Thresholding maps dark source pixels to 0 and light ones to 255,
/// so the drawn line -- dark on a light background -- comes out as 0.
pub const INK: u8 = 0;

/// Decode raw image bytes into a binary (0/255) grayscale grid.
///
/// Pixels with luminance at or below `config.threshold` become [`INK`]
/// (0); everything else becomes background (255). When
/// `config.working_resolution` is set and the image's longest axis
/// exceeds it, the image is first resized down (aspect preserved,
/// bilinear filter).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_and_binarize(
    bytes: &[u8],
    config: &TraceConfig,
) -> Result<GrayImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let decoded = image::load_from_memory(bytes)?;

    let decoded = match config.working_resolution {
        Some(max) if decoded.width().max(decoded.height()) > max => {
            decoded.resize(max, max, FilterType::Triangle)
        }
        _ => decoded,
    };

    let gray = decoded.to_luma8();
    Ok(threshold(&gray, config.threshold, ThresholdType::Binary))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Helper: encode a grayscale image as an in-memory PNG.
    fn encode_png(img: &GrayImage) -> Vec<u8> {
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

    fn no_resize_config() -> TraceConfig {
        TraceConfig {
            working_resolution: None,
            ..TraceConfig::default()
        }
    }

    #[test]
    fn empty_input_returns_error() {
        let result = decode_and_binarize(&[], &TraceConfig::default());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_return_decode_error() {
        let result = decode_and_binarize(&[0xFF, 0xFE, 0x00, 0x01], &TraceConfig::default());
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn dark_pixels_become_ink() {
        let img = GrayImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                image::Luma([10]) // dark: ink
            } else {
                image::Luma([240]) // light: background
            }
        });
        let png = encode_png(&img);

        let grid = decode_and_binarize(&png, &no_resize_config()).unwrap();
        assert_eq!(grid.get_pixel(0, 0).0[0], INK);
        assert_eq!(grid.get_pixel(1, 3).0[0], INK);
        assert_eq!(grid.get_pixel(2, 0).0[0], 255);
        assert_eq!(grid.get_pixel(3, 3).0[0], 255);
    }

    #[test]
    fn output_is_strictly_binary() {
        let img = GrayImage::from_fn(8, 8, |x, y| image::Luma([(x * 30 + y * 3) as u8]));
        let png = encode_png(&img);

        let grid = decode_and_binarize(&png, &no_resize_config()).unwrap();
        for pixel in grid.pixels() {
            assert!(pixel.0[0] == 0 || pixel.0[0] == 255);
        }
    }

    #[test]
    fn large_image_resized_to_working_resolution() {
        let img = GrayImage::from_pixel(400, 200, image::Luma([0]));
        let png = encode_png(&img);
        let config = TraceConfig {
            working_resolution: Some(100),
            ..TraceConfig::default()
        };

        let grid = decode_and_binarize(&png, &config).unwrap();
        // Longest axis capped at 100, aspect ratio preserved.
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 50);
    }

    #[test]
    fn small_image_not_resized() {
        let img = GrayImage::from_pixel(40, 20, image::Luma([0]));
        let png = encode_png(&img);
        let config = TraceConfig {
            working_resolution: Some(100),
            ..TraceConfig::default()
        };

        let grid = decode_and_binarize(&png, &config).unwrap();
        assert_eq!(grid.width(), 40);
        assert_eq!(grid.height(), 20);
    }
}
