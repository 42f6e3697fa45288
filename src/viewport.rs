// ============================================================================
// viewport.rs — Aviary
// Canvas sizing: logical size, device pixel ratio, backing-store dimensions.
// ============================================================================

use crate::error::ViewerError;

/// Logical width reserved for the statistics panel to the right of the canvas.
pub const DEFAULT_PANEL_WIDTH: u32 = 300;

/// The pixel-addressable drawing surface and its sizing metadata. The canvas
/// is square: `width_px == height_px == round(logical_px * pixel_ratio)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Displayed (logical) side length.
    pub logical_px: u32,
    /// Backing-store width in device pixels.
    pub width_px: u32,
    /// Backing-store height in device pixels.
    pub height_px: u32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.width_px as f64
    }

    pub fn height(&self) -> f64 {
        self.height_px as f64
    }
}

/// Computes viewport dimensions from the host window. Recomputed on every
/// reset; the per-frame surface clear itself happens in the render pass.
#[derive(Clone, Copy, Debug)]
pub struct ViewportManager {
    /// Explicit logical side length; when `None` the size is derived from
    /// the available area minus the panel reservation.
    logical_size: Option<u32>,
    panel_width: u32,
}

impl ViewportManager {
    pub fn new(logical_size: Option<u32>, panel_width: u32) -> Self {
        Self {
            logical_size,
            panel_width,
        }
    }

    /// Compute the viewport for the given available logical area and display
    /// scale factor. A degenerate (zero-area) result is a configuration
    /// error: there is no surface to draw on.
    pub fn reset(
        &self,
        avail_logical_w: u32,
        avail_logical_h: u32,
        scale_factor: f64,
    ) -> Result<Viewport, ViewerError> {
        let pixel_ratio = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };

        let logical_px = match self.logical_size {
            Some(size) => size,
            None => avail_logical_w
                .saturating_sub(self.panel_width)
                .min(avail_logical_h),
        };

        if logical_px == 0 {
            return Err(ViewerError::Configuration(format!(
                "no drawable area: {}x{} logical with a {} panel",
                avail_logical_w, avail_logical_h, self.panel_width
            )));
        }

        let side_px = (logical_px as f64 * pixel_ratio).round() as u32;

        Ok(Viewport {
            logical_px,
            width_px: side_px,
            height_px: side_px,
            pixel_ratio,
        })
    }
}
