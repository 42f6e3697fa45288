// ============================================================================
// drift.rs — Aviary
// Built-in demo engine: agents drift along their heading with small random
// turns, wrapping at the world edge. Lets the binary run without an external
// engine and exercises the full viewer surface, including generation
// rollover and statistics display.
// ============================================================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{Animal, Engine, Food, GenerationStatistics, WorldView};
use crate::error::EngineError;

/// Steps per generation, matching the cadence of the engines this viewer
/// targets.
pub const GENERATION_LENGTH: u32 = 2_500;

const TURN_JITTER: f64 = 0.05;

struct Drifter {
    x: f64,
    y: f64,
    rotation: f64,
    speed: f64,
}

pub struct DriftEngine {
    rng: StdRng,
    animals: Vec<Drifter>,
    food: Vec<Food>,
    generation: u32,
    generation_steps: u32,
    prev_stats: Option<GenerationStatistics>,
}

impl DriftEngine {
    pub fn new(num_animals: usize, num_food: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let animals = (0..num_animals)
            .map(|_| Drifter {
                x: rng.gen::<f64>(),
                y: rng.gen::<f64>(),
                rotation: rng.gen::<f64>() * std::f64::consts::TAU,
                speed: rng.gen_range(0.001..0.003),
            })
            .collect();

        let food = (0..num_food)
            .map(|_| Food {
                x: rng.gen::<f64>(),
                y: rng.gen::<f64>(),
            })
            .collect();

        Self {
            rng,
            animals,
            food,
            generation: 0,
            generation_steps: 0,
            prev_stats: None,
        }
    }

    fn roll_generation(&mut self) {
        if self.animals.is_empty() {
            self.generation += 1;
            self.generation_steps = 0;
            return;
        }

        // Distance covered stands in for fitness in the demo.
        let fitness: Vec<f64> = self
            .animals
            .iter()
            .map(|a| a.speed * f64::from(GENERATION_LENGTH))
            .collect();

        let max = fitness.iter().copied().fold(f64::MIN, f64::max);
        let min = fitness.iter().copied().fold(f64::MAX, f64::min);
        let mean = fitness.iter().sum::<f64>() / fitness.len() as f64;
        let var = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / fitness.len() as f64;

        self.prev_stats = Some(GenerationStatistics {
            max_fitness: max,
            min_fitness: min,
            mean_fitness: mean,
            std_fitness: var.sqrt(),
        });

        for food in &mut self.food {
            food.x = self.rng.gen::<f64>();
            food.y = self.rng.gen::<f64>();
        }

        self.generation += 1;
        self.generation_steps = 0;
    }
}

impl Engine for DriftEngine {
    fn step(&mut self) -> Result<(), EngineError> {
        for animal in &mut self.animals {
            animal.rotation += self.rng.gen_range(-TURN_JITTER..TURN_JITTER);
            animal.x = (animal.x + animal.rotation.cos() * animal.speed).rem_euclid(1.0);
            animal.y = (animal.y + animal.rotation.sin() * animal.speed).rem_euclid(1.0);
        }

        self.generation_steps += 1;
        if self.generation_steps >= GENERATION_LENGTH {
            self.roll_generation();
        }

        Ok(())
    }

    fn world(&self) -> WorldView {
        WorldView {
            animals: self
                .animals
                .iter()
                .map(|a| Animal {
                    x: a.x,
                    y: a.y,
                    rotation: a.rotation,
                })
                .collect(),
            food: self.food.clone(),
        }
    }

    fn generation(&self) -> u32 {
        self.generation
    }

    fn generation_steps(&self) -> u32 {
        self.generation_steps
    }

    fn prev_generation_statistics(&self) -> Option<GenerationStatistics> {
        self.prev_stats
    }
}
