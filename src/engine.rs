// ============================================================================
// engine.rs — Aviary
// The engine boundary: the simulation is an opaque collaborator consumed
// through this trait. The viewer never mutates or validates world state.
// ============================================================================

use crate::error::EngineError;

/// A mobile simulated entity: normalized position plus facing direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animal {
    pub x: f64,
    pub y: f64,
    /// Facing direction in radians.
    pub rotation: f64,
}

/// A static simulated entity: normalized position only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Food {
    pub x: f64,
    pub y: f64,
}

/// Read-only world snapshot fetched fresh each frame and discarded after
/// drawing. Coordinates are fractions of world extent in [0, 1]; the engine
/// is trusted to emit valid ranges and nothing here clamps them.
#[derive(Clone, Debug, Default)]
pub struct WorldView {
    pub animals: Vec<Animal>,
    pub food: Vec<Food>,
}

/// Aggregate fitness metrics over a completed generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationStatistics {
    pub max_fitness: f64,
    pub min_fitness: f64,
    pub mean_fitness: f64,
    pub std_fitness: f64,
}

/// Capability interface of the external simulation engine.
///
/// `step` may internally complete a generation and reset world state; the
/// viewer calls it exactly once per rendered frame. All accessors reflect
/// the state after the most recent step.
pub trait Engine {
    fn step(&mut self) -> Result<(), EngineError>;

    fn world(&self) -> WorldView;

    fn generation(&self) -> u32;

    fn generation_steps(&self) -> u32;

    /// Statistics of the previously completed generation, or `None` until
    /// the engine finishes its first one.
    fn prev_generation_statistics(&self) -> Option<GenerationStatistics>;
}
