// ============================================================================
// mapper.rs — Aviary
// Normalized simulation coordinates to device-pixel coordinates.
// ============================================================================

use crate::viewport::Viewport;

/// Map a normalized position (fractions of world extent) to device pixels.
///
/// Pure and exact: `(x * width_px, y * height_px)`. Inputs outside [0, 1]
/// pass through unclamped and simply land off-canvas.
pub fn to_pixel(x: f64, y: f64, viewport: &Viewport) -> (f64, f64) {
    (x * viewport.width(), y * viewport.height())
}
