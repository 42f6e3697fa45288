// ============================================================================
// scene.rs — Aviary
// Shape tessellation: animals as oriented triangles, food as filled circles.
// The painter owns the per-frame vertex list; the GPU pipeline draws it as-is.
// ============================================================================

use std::f64::consts::PI;

use crate::viewport::Viewport;

/// Agent triangle vertex distance from center, as a fraction of canvas width.
pub const AGENT_SIZE_RATIO: f64 = 0.01;

/// Food circle radius as a fraction of canvas width.
pub const FOOD_SIZE_RATIO: f64 = 0.005;

/// Angle between the head vertex and each trailing leg vertex (140°).
pub const LEG_ANGLE: f64 = 7.0 * PI / 9.0;

/// Slices in the triangle fan approximating a food circle.
pub const FOOD_SEGMENTS: u32 = 24;

pub const AGENT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const FOOD_COLOR: [f32; 4] = [0.0, 1.0, 0.5, 1.0];

/// One colored vertex in device-pixel coordinates, uploadable directly.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Immediate-mode painter for one frame's shapes. Paint calls are idempotent:
/// identical inputs append identical vertices.
#[derive(Clone, Debug)]
pub struct ScenePainter {
    viewport: Viewport,
    vertices: Vec<Vertex>,
}

impl ScenePainter {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
        }
    }

    /// Start a new frame: drop all shapes and adopt the current viewport.
    pub fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.vertices.clear();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Paint one animal: a filled isoceles triangle with the head vertex at
    /// `rotation` and the legs at `rotation ± 140°`, all at the same radius.
    pub fn draw_agent(&mut self, px: f64, py: f64, rotation: f64) {
        let size = AGENT_SIZE_RATIO * self.viewport.width();

        for angle in [rotation, rotation + LEG_ANGLE, rotation - LEG_ANGLE] {
            self.vertices.push(Vertex {
                position: [
                    (px + angle.cos() * size) as f32,
                    (py + angle.sin() * size) as f32,
                ],
                color: AGENT_COLOR,
            });
        }
    }

    /// Paint one food item: a filled circle, full 360° sweep, approximated
    /// by a triangle fan around the center.
    pub fn draw_food(&mut self, px: f64, py: f64) {
        let radius = FOOD_SIZE_RATIO * self.viewport.width();
        let center = [px as f32, py as f32];

        for i in 0..FOOD_SEGMENTS {
            let a0 = f64::from(i) / f64::from(FOOD_SEGMENTS) * 2.0 * PI;
            let a1 = f64::from(i + 1) / f64::from(FOOD_SEGMENTS) * 2.0 * PI;

            self.vertices.push(Vertex {
                position: center,
                color: FOOD_COLOR,
            });
            self.vertices.push(Vertex {
                position: [
                    (px + a0.cos() * radius) as f32,
                    (py + a0.sin() * radius) as f32,
                ],
                color: FOOD_COLOR,
            });
            self.vertices.push(Vertex {
                position: [
                    (px + a1.cos() * radius) as f32,
                    (py + a1.sin() * radius) as f32,
                ],
                color: FOOD_COLOR,
            });
        }
    }
}
