//! Physiological constants derived from a genome at birth.

use serde::{Deserialize, Serialize};

use super::super::genome::{Genome, Trait};

/// Hunger ceiling shared by every entity.
pub const MAX_HUNGER: f32 = 100.0;

/// Fixed per-entity parameters computed once from effective trait values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physiology {
    /// Effective size trait, scales upkeep and hunger.
    pub size: f32,
    /// Top speed at full energy.
    pub base_speed: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Maximum energy.
    pub max_energy: f32,
    /// Maximum hunger.
    pub max_hunger: f32,
    /// Distance within which neighbors count as crowding.
    pub sensor_range: f32,
    /// Radians per time unit at full turn intent.
    pub turn_rate: f32,
    /// Largest food size that fits the mouth.
    pub mouth_size: f32,
    /// Teeth trait, scales energy extracted from meals.
    pub mouth_teeth: f32,
    /// Fraction of food energy recovered by digestion.
    pub digestion_efficiency: f32,
    /// Metabolic rate multiplier.
    pub metabolism_rate: f32,
    /// Aggression drive.
    pub aggression: f32,
    /// Reproduction drive.
    pub reproduction_rate: f32,
    /// Body radius.
    pub radius: f32,
    /// Body mass.
    pub mass: f32,
    /// Ticks before the next meal may be accepted.
    pub digestion_cooldown: f32,
    /// Energy paid for each reproduction.
    pub reproduction_cost: f32,
}

impl Physiology {
    /// Derives physiology from a genome's effective traits.
    pub fn from_genome(genome: &Genome) -> Self {
        let t = |t: Trait| genome.get_effective_trait(t);
        let size = t(Trait::Size);
        let forward_organ_size = t(Trait::ForwardOrganSize);
        let digestion = t(Trait::Digestion);
        let metabolism = t(Trait::Metabolism);
        let radius = 20.0 * (0.75 + 0.5 * size);

        Self {
            size,
            base_speed: 100.0 + 150.0 * forward_organ_size,
            max_health: 100.0 + 100.0 * t(Trait::Health),
            max_energy: 100.0 + 100.0 * metabolism,
            max_hunger: MAX_HUNGER,
            sensor_range: 150.0 + 100.0 * t(Trait::SensorRange),
            turn_rate: 2.0 + 2.0 * forward_organ_size,
            mouth_size: 5.0 + 15.0 * t(Trait::MouthSize),
            mouth_teeth: t(Trait::MouthTeeth),
            digestion_efficiency: 0.3 + 0.7 * digestion,
            metabolism_rate: 0.3 + 0.7 * metabolism,
            aggression: t(Trait::Aggression),
            reproduction_rate: t(Trait::Reproduction),
            radius,
            mass: radius * (0.4 + 0.2 * size),
            digestion_cooldown: (30.0 - 20.0 * digestion).max(10.0),
            reproduction_cost: 20.0 + 20.0 * size,
        }
    }
}
