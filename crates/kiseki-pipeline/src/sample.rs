//! Strided ink-pixel sampling.
//!
//! Scans the binarized grid row-major, visiting every `stride`-th row
//! and column, and collects the coordinates of ink cells. The scan
//! order is deterministic, and downstream ordering uses it as both the
//! seed choice and the tie-break order, so identical input always
//! produces identical output.

use image::GrayImage;

use crate::binarize::INK;
use crate::types::{PipelineError, PixelPoint};

/// Extract ink pixel coordinates from a binarized grid.
///
/// A cell is included iff its value equals [`INK`]. `stride` controls
/// density: 1 visits every pixel, 2 every other row and column, and so
/// on; 0 is treated as 1. Larger strides trade shape detail for a
/// smaller point cloud, which matters because ordering cost grows
/// quadratically with the point count.
///
/// # Errors
///
/// Returns [`PipelineError::InsufficientInk`] if fewer than 2 ink
/// pixels are found -- the image has no extractable shape.
pub fn sample_ink(grid: &GrayImage, stride: u32) -> Result<Vec<PixelPoint>, PipelineError> {
    let stride = stride.max(1) as usize;

    let mut points = Vec::new();
    for y in (0..grid.height()).step_by(stride) {
        for x in (0..grid.width()).step_by(stride) {
            if grid.get_pixel(x, y).0[0] == INK {
                points.push(PixelPoint::new(x, y));
            }
        }
    }

    if points.len() < 2 {
        return Err(PipelineError::InsufficientInk {
            found: points.len(),
        });
    }
    Ok(points)
}
