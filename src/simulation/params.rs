//! Simulation parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tunables for world size, population, lifecycle and evolution.
///
/// Missing fields fall back to their defaults when read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Simulation area width.
    pub world_width: f32,
    /// Simulation area height.
    pub world_height: f32,
    /// Distance from every wall kept free when placing objects.
    pub wall_margin: f32,
    /// Target population after each generational replacement.
    pub population_size: usize,
    /// Number of entities spawned when the world is created.
    pub initial_entities: usize,
    /// Number of food items spawned when the world is created.
    pub initial_food: usize,
    /// Spawn a new food item whenever one is eaten.
    pub respawn_eaten_food: bool,
    /// Let eligible entities pay the reproduction cost automatically each tick.
    pub auto_reproduce: bool,
    /// Breed offspring brains from survivors instead of starting fresh.
    pub inherit_brain: bool,
    /// Age at which an entity dies.
    pub max_age: f32,
    /// Age mapped to the top of the age sensor range.
    pub age_normalization: f32,
    /// Distance beyond which food no longer registers on the distance sensor.
    pub food_sense_horizon: f32,
    /// Health lost per time unit while energy is exhausted.
    pub health_decay_rate: f32,
    /// Ticks an entity must wait between reproductions.
    pub reproduction_cooldown: f32,
    /// Fraction of the population kept by the selector.
    pub survivor_fraction: f32,
    /// Lower bound on survivors kept by the selector.
    pub min_survivors: usize,
    /// Standard deviation of brain weight mutations.
    pub brain_mutation_std: f32,
    /// Half-width of genome mutation steps.
    pub genome_mutation_step: f32,
    /// Seed for the simulation RNG.
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            wall_margin: 20.0,
            population_size: 20,
            initial_entities: 10,
            initial_food: 30,
            respawn_eaten_food: true,
            auto_reproduce: true,
            inherit_brain: false,
            max_age: 3000.0,
            age_normalization: 1000.0,
            food_sense_horizon: 500.0,
            health_decay_rate: 0.5,
            reproduction_cooldown: 100.0,
            survivor_fraction: 0.2,
            min_survivors: 2,
            brain_mutation_std: 0.1,
            genome_mutation_step: 0.05,
            seed: 42,
        }
    }
}

impl Params {
    /// Reads and validates parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Writes parameters to a JSON file.
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Checks that every parameter is within its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::Invalid("world dimensions must be positive"));
        }
        if self.wall_margin < 0.0
            || self.wall_margin * 2.0 >= self.world_width
            || self.wall_margin * 2.0 >= self.world_height
        {
            return Err(ConfigError::Invalid(
                "wall margin must be non-negative and less than half of each dimension",
            ));
        }
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population size must be at least 1"));
        }
        if !(self.survivor_fraction > 0.0 && self.survivor_fraction <= 1.0) {
            return Err(ConfigError::Invalid("survivor fraction must be in (0, 1]"));
        }
        if self.max_age <= 0.0 {
            return Err(ConfigError::Invalid("max age must be positive"));
        }
        if self.age_normalization <= 0.0 || self.food_sense_horizon <= 0.0 {
            return Err(ConfigError::Invalid(
                "sensor normalization constants must be positive",
            ));
        }
        if self.health_decay_rate < 0.0
            || self.reproduction_cooldown < 0.0
            || self.brain_mutation_std < 0.0
            || self.genome_mutation_step < 0.0
        {
            return Err(ConfigError::Invalid("rates must be non-negative"));
        }
        Ok(())
    }

    /// Number of survivors the selector keeps from a population of `current` entities.
    pub fn survivor_count(&self, current: usize) -> usize {
        let by_fraction = (self.survivor_fraction * current as f32).round() as usize;
        by_fraction.max(self.min_survivors).min(current)
    }
}
