//! Thick straight-segment rasterizer
//!
//! Fills the segment as an oriented rectangle: step the perpendicular
//! offset across the stroke width, and for each offset walk the segment
//! length, setting one pixel per step. Steps are half a pixel in both
//! directions, so pixels are overdrawn rather than exactly scan-filled.
//! No anti-aliasing; the color is a flat overwrite.

use tracing::trace;

use exprint_core::{Color, FixedPoint, RasterTarget};

const STEP: f64 = 0.5;

/// Draw a `width`-thick segment from `from` to `to` (26.6 coordinates).
///
/// A degenerate segment (`from == to`) sets no pixels.
pub fn draw_line(
    target: &mut dyn RasterTarget,
    from: FixedPoint,
    to: FixedPoint,
    width: f64,
    color: Color,
) {
    let (fx, fy) = from.to_f64();
    let (tx, ty) = to.to_f64();
    let dx = tx - fx;
    let dy = ty - fy;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return;
    }
    trace!(fx, fy, tx, ty, width, "stroking segment");
    let sin = dy / len;
    let cos = dx / len;

    // Lower edge of the stroke: half the width along the perpendicular.
    let x0 = fx - sin * width / 2.0;
    let y0 = fy + cos * width / 2.0;

    let mut offset = 0.0;
    while offset <= width {
        let start_x = x0 + offset * sin;
        let start_y = y0 - offset * cos;
        let mut along = 0.0;
        while along <= len {
            target.set_pixel(
                (start_x + along * cos) as i32,
                (start_y + along * sin) as i32,
                color,
            );
            along += STEP;
        }
        offset += STEP;
    }
}
