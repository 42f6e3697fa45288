use std::cell::Cell;
use std::rc::Rc;

use aviary::drift::DriftEngine;
use aviary::engine::{Animal, Engine, Food, GenerationStatistics, WorldView};
use aviary::error::{EngineError, ViewerError};
use aviary::frame::FrameController;
use aviary::scene::FOOD_SEGMENTS;
use aviary::stats::format_stats;
use aviary::viewport::Viewport;

fn test_viewport() -> Viewport {
    Viewport {
        logical_px: 1000,
        width_px: 1000,
        height_px: 1000,
        pixel_ratio: 1.0,
    }
}

/// Scripted engine: fixed world, counted steps, optional failure step.
struct StubEngine {
    steps: Rc<Cell<u32>>,
    world: WorldView,
    generation: u32,
    generation_steps: u32,
    stats: Option<GenerationStatistics>,
    fail_on_step: Option<u32>,
}

impl StubEngine {
    fn new(animals: usize, food: usize) -> Self {
        Self {
            steps: Rc::new(Cell::new(0)),
            world: WorldView {
                animals: (0..animals)
                    .map(|i| Animal {
                        x: 0.1 * i as f64,
                        y: 0.2,
                        rotation: 0.0,
                    })
                    .collect(),
                food: (0..food)
                    .map(|i| Food {
                        x: 0.05 * i as f64,
                        y: 0.9,
                    })
                    .collect(),
            },
            generation: 0,
            generation_steps: 0,
            stats: None,
            fail_on_step: None,
        }
    }
}

impl Engine for StubEngine {
    fn step(&mut self) -> Result<(), EngineError> {
        let step = self.steps.get() + 1;
        self.steps.set(step);
        if self.fail_on_step == Some(step) {
            return Err(EngineError::new("stub fault"));
        }
        self.generation_steps += 1;
        Ok(())
    }

    fn world(&self) -> WorldView {
        self.world.clone()
    }

    fn generation(&self) -> u32 {
        self.generation
    }

    fn generation_steps(&self) -> u32 {
        self.generation_steps
    }

    fn prev_generation_statistics(&self) -> Option<GenerationStatistics> {
        self.stats
    }
}

// ---------------- Frame cycle invariants ----------------

#[test]
fn step_runs_exactly_once_per_frame() {
    let engine = StubEngine::new(2, 3);
    let steps = engine.steps.clone();
    let mut controller = FrameController::new(engine, test_viewport());
    controller.start();

    controller.run_frame(test_viewport()).expect("frame");
    assert_eq!(steps.get(), 1);

    controller.run_frame(test_viewport()).expect("frame");
    assert_eq!(steps.get(), 2);
    assert_eq!(controller.frame(), 2);
}

#[test]
fn draw_calls_match_world_population() {
    let mut controller = FrameController::new(StubEngine::new(2, 3), test_viewport());
    controller.start();
    controller.run_frame(test_viewport()).expect("frame");

    // 3 vertices per agent triangle, 3 per food fan slice.
    let expected = 2 * 3 + 3 * (FOOD_SEGMENTS as usize * 3);
    assert_eq!(controller.painter().vertices().len(), expected);
}

#[test]
fn frame_output_resets_each_cycle() {
    let mut controller = FrameController::new(StubEngine::new(1, 1), test_viewport());
    controller.start();

    controller.run_frame(test_viewport()).expect("frame");
    let first = controller.painter().vertices().len();
    controller.run_frame(test_viewport()).expect("frame");
    assert_eq!(controller.painter().vertices().len(), first);
}

#[test]
fn stopped_controller_neither_steps_nor_repaints() {
    let engine = StubEngine::new(1, 1);
    let steps = engine.steps.clone();
    let mut controller = FrameController::new(engine, test_viewport());
    controller.start();
    controller.run_frame(test_viewport()).expect("frame");

    controller.stop();
    assert!(!controller.is_running());

    let painted = controller.painter().vertices().len();
    controller.run_frame(test_viewport()).expect("no-op");
    assert_eq!(steps.get(), 1);
    assert_eq!(controller.painter().vertices().len(), painted);
    assert_eq!(controller.frame(), 1);
}

#[test]
fn engine_fault_stops_the_loop() {
    let mut engine = StubEngine::new(1, 1);
    engine.fail_on_step = Some(2);
    let steps = engine.steps.clone();
    let mut controller = FrameController::new(engine, test_viewport());
    controller.start();

    controller.run_frame(test_viewport()).expect("first frame");
    let stats_before = controller.stats_text().to_string();

    let err = controller.run_frame(test_viewport()).unwrap_err();
    assert!(matches!(err, ViewerError::Engine(_)));
    assert!(!controller.is_running());

    // The failed cycle had already cleared the canvas; the stats keep their
    // last good content and no further frame advances the engine.
    assert!(controller.painter().vertices().is_empty());
    assert_eq!(controller.stats_text(), stats_before);
    controller.run_frame(test_viewport()).expect("no-op");
    assert_eq!(steps.get(), 2);
}

// ---------------- Statistics text ----------------

#[test]
fn stats_text_renders_values_in_order() {
    let stats = GenerationStatistics {
        max_fitness: 1.0,
        min_fitness: 0.2,
        mean_fitness: 0.5,
        std_fitness: 0.1,
    };

    let text = format_stats(3, 40, Some(&stats));
    assert_eq!(
        text,
        "Generation: 3\n\
         Generation steps: 40\n\
         Max fitness: 1\n\
         Min fitness: 0.2\n\
         Mean fitness: 0.5\n\
         Std fitness: 0.1"
    );
}

#[test]
fn stats_text_renders_null_placeholders_before_first_generation() {
    let text = format_stats(0, 7, None);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Generation: 0");
    assert_eq!(lines[1], "Generation steps: 7");
    for line in &lines[2..] {
        assert!(line.ends_with(": null"), "line without placeholder: {line}");
    }
}

#[test]
fn stats_text_tracks_the_engine_each_frame() {
    let mut engine = StubEngine::new(1, 0);
    engine.generation = 5;
    engine.stats = Some(GenerationStatistics {
        max_fitness: 2.5,
        min_fitness: 0.5,
        mean_fitness: 1.5,
        std_fitness: 0.25,
    });

    let mut controller = FrameController::new(engine, test_viewport());
    controller.start();
    controller.run_frame(test_viewport()).expect("frame");

    let text = controller.stats_text();
    assert!(text.contains("Generation: 5"));
    assert!(text.contains("Generation steps: 1"));
    assert!(text.contains("Max fitness: 2.5"));
}

// ---------------- Demo engine ----------------

#[test]
fn drift_engine_is_deterministic_under_a_seed() {
    let mut a = DriftEngine::new(8, 16, Some(42));
    let mut b = DriftEngine::new(8, 16, Some(42));

    for _ in 0..50 {
        a.step().expect("step");
        b.step().expect("step");
    }

    let (wa, wb) = (a.world(), b.world());
    assert_eq!(wa.animals, wb.animals);
    assert_eq!(wa.food, wb.food);
}

#[test]
fn drift_engine_keeps_entities_in_normalized_range() {
    let mut engine = DriftEngine::new(8, 16, Some(7));
    for _ in 0..200 {
        engine.step().expect("step");
    }

    let world = engine.world();
    assert_eq!(world.animals.len(), 8);
    assert_eq!(world.food.len(), 16);
    for animal in &world.animals {
        assert!((0.0..1.0).contains(&animal.x));
        assert!((0.0..1.0).contains(&animal.y));
    }
    assert!(engine.prev_generation_statistics().is_none());
    assert_eq!(engine.generation_steps(), 200);
}
