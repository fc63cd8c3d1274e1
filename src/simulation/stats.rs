//! Population statistics and per-generation history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::ecosystem::Ecosystem;
use super::physics::Physics;

/// Point-in-time summary of a world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Generation counter at collection time.
    pub generation: u32,
    /// Living entities.
    pub count: usize,
    /// Mean fitness, 0 for an empty population.
    pub mean_fitness: f32,
    /// Best fitness, 0 for an empty population.
    pub max_fitness: f32,
    /// Mean age.
    pub mean_age: f32,
    /// Meals accepted by the living population.
    pub total_food_eaten: u32,
    /// Food items in the world.
    pub food_count: usize,
    /// Waste items in the world.
    pub waste_count: usize,
}

impl PopulationStats {
    /// Summarizes the current state of a world.
    pub fn collect<P: Physics>(ecosystem: &Ecosystem<P>) -> Self {
        let count = ecosystem.entities.len();
        let (fitness_sum, max_fitness) = ecosystem
            .entities
            .iter()
            .map(|e| e.fitness())
            .fold((0.0_f32, 0.0_f32), |(sum, max), f| (sum + f, max.max(f)));
        let age_sum: f32 = ecosystem.entities.iter().map(|e| e.vitals.age).sum();
        let total_food_eaten = ecosystem
            .entities
            .iter()
            .map(|e| e.vitals.food_eaten)
            .sum();
        let mean = |sum: f32| if count == 0 { 0.0 } else { sum / count as f32 };

        Self {
            generation: ecosystem.generation,
            count,
            mean_fitness: mean(fitness_sum),
            max_fitness,
            mean_age: mean(age_sum),
            total_food_eaten,
            food_count: ecosystem.food.len(),
            waste_count: ecosystem.waste.len(),
        }
    }
}

/// Bounded record of the population right before each generational replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationHistory {
    /// Recorded summaries, oldest first.
    pub entries: VecDeque<PopulationStats>,
    /// Maximum number of summaries kept.
    pub max_history: usize,
}

impl Default for GenerationHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl GenerationHistory {
    /// Creates an empty history keeping at most `max_history` entries.
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Appends a summary, evicting the oldest beyond capacity.
    pub fn record(&mut self, stats: PopulationStats) {
        self.entries.push_back(stats);
        while self.entries.len() > self.max_history {
            self.entries.pop_front();
        }
    }

    /// Most recent summary.
    pub fn latest(&self) -> Option<&PopulationStats> {
        self.entries.back()
    }

    /// Number of recorded summaries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best fitness across all recorded generations.
    pub fn best_fitness(&self) -> f32 {
        self.entries
            .iter()
            .map(|s| s.max_fitness)
            .fold(0.0, f32::max)
    }
}
