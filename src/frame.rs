// ============================================================================
// frame.rs — Aviary
// The frame controller: one engine step and one repaint per animation frame,
// with an explicit start/stop lifecycle guarding rescheduling.
// ============================================================================

use crate::engine::Engine;
use crate::error::ViewerError;
use crate::mapper::to_pixel;
use crate::scene::ScenePainter;
use crate::stats;
use crate::viewport::Viewport;

/// Owns the engine and the painter for the lifetime of the loop and runs one
/// frame cycle per host redraw callback:
///
/// 1. clear the painter for a blank canvas,
/// 2. advance the engine exactly one step,
/// 3. map and paint every animal and food item in engine order,
/// 4. rebuild the statistics text.
///
/// The host reschedules the next frame only while `is_running()`; that check
/// is the cancellation token. An engine fault drops the running flag and
/// propagates, so a failed cycle is never rescheduled.
pub struct FrameController<E: Engine> {
    engine: E,
    painter: ScenePainter,
    stats_text: String,
    running: bool,
    frame: u64,
}

impl<E: Engine> FrameController<E> {
    pub fn new(engine: E, viewport: Viewport) -> Self {
        let stats_text = stats::format_stats(
            engine.generation(),
            engine.generation_steps(),
            engine.prev_generation_statistics().as_ref(),
        );
        Self {
            engine,
            painter: ScenePainter::new(viewport),
            stats_text,
            running: false,
            frame: 0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn painter(&self) -> &ScenePainter {
        &self.painter
    }

    pub fn stats_text(&self) -> &str {
        &self.stats_text
    }

    /// Frames completed since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame cycle. A stopped controller leaves the engine and the
    /// previous frame's output untouched.
    pub fn run_frame(&mut self, viewport: Viewport) -> Result<(), ViewerError> {
        if !self.running {
            return Ok(());
        }

        self.painter.clear(viewport);

        if let Err(fault) = self.engine.step() {
            self.running = false;
            return Err(ViewerError::Engine(fault));
        }

        let world = self.engine.world();

        for animal in &world.animals {
            let (px, py) = to_pixel(animal.x, animal.y, &viewport);
            self.painter.draw_agent(px, py, animal.rotation);
        }

        for food in &world.food {
            let (px, py) = to_pixel(food.x, food.y, &viewport);
            self.painter.draw_food(px, py);
        }

        self.stats_text = stats::format_stats(
            self.engine.generation(),
            self.engine.generation_steps(),
            self.engine.prev_generation_statistics().as_ref(),
        );

        self.frame += 1;
        Ok(())
    }
}
