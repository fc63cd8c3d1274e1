//! Per-tick hormone feedback on behavioral parameters.
//!
//! The response is a pure function of physiology, vitals, hormone levels and
//! local crowding. It is rebuilt from the baseline every tick, so nudges never
//! compound across ticks.

use serde::{Deserialize, Serialize};

use super::super::genome::{Genome, Hormone};
use super::physiology::Physiology;
use super::Vitals;

/// Neighbor count above which an entity counts as crowded.
const CROWDING_THRESHOLD: usize = 2;

/// Behavioral parameters after hormone feedback for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HormoneResponse {
    /// Top speed.
    pub speed: f32,
    /// Crowding detection range.
    pub sensor_range: f32,
    /// Aggression drive.
    pub aggression: f32,
    /// Digestion efficiency applied to new meals.
    pub digestion_efficiency: f32,
    /// Metabolic rate.
    pub metabolism_rate: f32,
    /// Reproduction drive.
    pub reproduction_rate: f32,
}

impl HormoneResponse {
    /// Response with no hormone feedback applied.
    pub fn baseline(physiology: &Physiology) -> Self {
        Self {
            speed: physiology.base_speed,
            sensor_range: physiology.sensor_range,
            aggression: physiology.aggression,
            digestion_efficiency: physiology.digestion_efficiency,
            metabolism_rate: physiology.metabolism_rate,
            reproduction_rate: physiology.reproduction_rate,
        }
    }

    /// Computes this tick's response.
    ///
    /// # Arguments
    ///
    /// * `genome` - Source of hormone levels
    /// * `physiology` - Baseline parameters and maxima
    /// * `vitals` - Current energy, health and hunger
    /// * `neighbors` - Number of other entities within sensor range
    pub fn compute(
        genome: &Genome,
        physiology: &Physiology,
        vitals: &Vitals,
        neighbors: usize,
    ) -> Self {
        let level = |h: Hormone| genome.hormone(h);
        let mut response = Self::baseline(physiology);

        if vitals.health < physiology.max_health * 0.3 {
            let adrenaline = level(Hormone::Adrenaline);
            response.speed *= 1.0 + 0.5 * adrenaline;
            response.sensor_range *= 1.0 + 0.3 * adrenaline;
        }

        if vitals.energy > physiology.max_energy * 0.7 {
            response.aggression *= 1.0 + 0.4 * level(Hormone::Testosterone);
        }

        if vitals.hunger > physiology.max_hunger * 0.7 {
            response.digestion_efficiency *= 1.0 + 0.3 * level(Hormone::Insulin);
        }

        if vitals.energy < physiology.max_energy * 0.3 {
            response.metabolism_rate *= 1.0 - 0.2 * level(Hormone::Melatonin);
        }

        if neighbors > CROWDING_THRESHOLD {
            let oxytocin = level(Hormone::Oxytocin);
            response.aggression *= 1.0 - 0.3 * oxytocin;
            response.reproduction_rate *= 1.0 + 0.2 * oxytocin;
        }

        response
    }
}
