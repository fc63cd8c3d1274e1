//! Population snapshots on disk.
//!
//! A snapshot stores the parameters, counters and every entity's genome, brain,
//! vitals and pose. Food and waste are not persisted; a loaded world is
//! restocked with fresh food.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::brain::Brain;
use super::ecosystem::Ecosystem;
use super::entity::{DigestionQueue, Entity, EntityId, Vitals};
use super::error::SnapshotError;
use super::genome::Genome;
use super::params::Params;
use super::physics::{Physics, Space};
use super::rng::create_rng;

/// Persisted state of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Identity.
    pub id: EntityId,
    /// Genome base values and hormone levels.
    pub genome: Genome,
    /// Controller weights.
    pub brain: Brain,
    /// Physiological state.
    pub vitals: Vitals,
    /// Meals in progress.
    pub digestion: DigestionQueue,
    /// Body center x.
    pub x: f32,
    /// Body center y.
    pub y: f32,
    /// Heading in radians.
    pub angle: f32,
}

/// Persisted state of a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// Parameters of the saved world.
    pub params: Params,
    /// Generation counter.
    pub generation: u32,
    /// Simulated time.
    pub time: f32,
    /// Ticks run.
    pub ticks: u64,
    /// Next identity to hand out.
    pub next_id: EntityId,
    /// Living entities.
    pub entities: Vec<EntitySnapshot>,
}

impl<P: Physics> Ecosystem<P> {
    /// Captures the current population.
    pub fn snapshot(&self) -> Snapshot {
        let entities = self
            .entities
            .iter()
            .filter_map(|e| {
                let body = self.physics.body(e.body)?;
                Some(EntitySnapshot {
                    id: e.id,
                    genome: e.genome.copy(),
                    brain: e.brain.clone(),
                    vitals: e.vitals,
                    digestion: e.digestion.clone(),
                    x: body.position.x(),
                    y: body.position.y(),
                    angle: body.angle,
                })
            })
            .collect();

        Snapshot {
            saved_at: Utc::now(),
            params: self.params.clone(),
            generation: self.generation,
            time: self.time,
            ticks: self.ticks,
            next_id: self.next_id,
            entities,
        }
    }

    /// Replaces the population and counters with those of a snapshot.
    ///
    /// Genome values are clamped on the way in. Brains that do not have the fixed
    /// controller shape are rejected before anything is modified.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        if let Some(bad) = snapshot.entities.iter().find(|e| !e.brain.is_well_formed()) {
            return Err(SnapshotError::BrainShape {
                id: bad.id,
                actual: bad.brain.shape(),
                expected: Brain::SHAPE.to_vec(),
            });
        }

        self.clear_entities();
        let mut next_id = snapshot.next_id;
        for saved in snapshot.entities {
            let genome = Genome::from_parts(*saved.genome.bases(), *saved.genome.hormones());
            let mut entity = Entity::restore(
                saved.id,
                genome,
                saved.brain,
                saved.vitals,
                &mut self.physics,
                Point::new(saved.x, saved.y),
                saved.angle,
            );
            entity.digestion = saved.digestion;
            next_id = next_id.max(saved.id + 1);
            self.entities.push(entity);
        }

        self.generation = snapshot.generation;
        self.time = snapshot.time;
        self.ticks = snapshot.ticks;
        self.next_id = next_id;
        Ok(())
    }

    /// Writes the population snapshot as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        fs::write(path, json)?;
        info!(
            path = %path.display(),
            entities = self.entities.len(),
            generation = self.generation,
            "saved snapshot"
        );
        Ok(())
    }
}

impl Ecosystem<Space> {
    /// Loads a world from a JSON snapshot, restocking food from the saved parameters.
    ///
    /// The stored parameters are validated like a config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        snapshot.params.validate()?;

        let params = snapshot.params.clone();
        let physics = Space::new(params.world_width, params.world_height);
        let rng = create_rng(params.seed ^ snapshot.ticks);
        let mut ecosystem = Ecosystem::empty(params, physics, rng);
        ecosystem.restore(snapshot)?;
        for _ in 0..ecosystem.params.initial_food {
            ecosystem.spawn_food(None);
        }

        info!(
            path = %path.display(),
            entities = ecosystem.entities.len(),
            generation = ecosystem.generation,
            "loaded snapshot"
        );
        Ok(ecosystem)
    }
}
