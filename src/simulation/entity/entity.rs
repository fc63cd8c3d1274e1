//! Entity state and the per-tick physiological update.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::brain::{Activations, Brain};
use super::super::food::Food;
use super::super::genome::Genome;
use super::super::geometric_utils::{heading_unit, wrap_angle};
use super::super::locatable::Locatable;
use super::super::params::Params;
use super::super::physics::{BodyDesc, BodyHandle, BodyState, Physics};
use super::digestion::{DigestionQueue, Meal};
use super::hormones::HormoneResponse;
use super::physiology::Physiology;
use super::sensors::{self, WorldView};

/// Identity of an entity, unique within a world.
pub type EntityId = usize;

/// Continuous physiological state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Current energy in [0, `max_energy`].
    pub energy: f32,
    /// Current health in [0, `max_health`].
    pub health: f32,
    /// Current hunger in [0, `max_hunger`].
    pub hunger: f32,
    /// Time alive.
    pub age: f32,
    /// Meals accepted.
    pub food_eaten: u32,
    /// Successful reproductions.
    pub children: u32,
    /// Total distance covered.
    pub distance_traveled: f32,
    /// Time until reproduction is allowed again.
    pub reproduction_cooldown: f32,
    /// Time until another meal is accepted.
    pub digestion_cooldown: f32,
}

impl Vitals {
    /// Fresh vitals for a newborn.
    pub fn newborn(physiology: &Physiology) -> Self {
        Self {
            energy: physiology.max_energy * 0.8,
            health: physiology.max_health.min(100.0),
            ..Self::default()
        }
    }
}

/// Why an entity died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Health reached zero.
    Exhaustion,
    /// Age reached the lifespan ceiling.
    OldAge,
    /// The physics body disappeared.
    BodyLost,
}

/// Physics command produced by an update, applied by the world afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    /// New linear velocity.
    pub velocity: Coord<f32>,
    /// New heading in radians.
    pub angle: f32,
}

/// Everything the world needs to act on after an entity update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Movement to write back to the physics body.
    pub command: MotionCommand,
    /// Waste to create as `(size, quality)`, one per finished meal.
    pub waste: Vec<(f32, f32)>,
    /// Set when the entity must be removed.
    pub death: Option<DeathCause>,
}

/// An autonomous agent with a genome, a brain and a physics body.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Identity.
    pub id: EntityId,
    /// Inherited characteristics.
    pub genome: Genome,
    /// Controller.
    pub brain: Brain,
    /// Handle of the body owned by the physics world.
    pub body: BodyHandle,
    /// Parameters derived from the genome at birth.
    pub physiology: Physiology,
    /// Energy, health, hunger and counters.
    pub vitals: Vitals,
    /// Meals in progress.
    pub digestion: DigestionQueue,
    /// Hormone feedback computed at the end of the last tick.
    pub response: HormoneResponse,
    /// Activations of the last forward pass.
    pub last_activations: Activations,
}

impl Entity {
    /// Creates a newborn entity and registers its body.
    ///
    /// # Arguments
    ///
    /// * `id` - Identity, unique within the world
    /// * `genome` - Genome the entity takes ownership of
    /// * `brain` - Controller the entity takes ownership of
    /// * `physics` - Physics world that will own the body
    /// * `position` - Initial body center
    /// * `angle` - Initial heading
    pub fn spawn<P: Physics + ?Sized>(
        id: EntityId,
        genome: Genome,
        brain: Brain,
        physics: &mut P,
        position: Point<f32>,
        angle: f32,
    ) -> Self {
        let physiology = Physiology::from_genome(&genome);
        let vitals = Vitals::newborn(&physiology);
        Self::restore(id, genome, brain, vitals, physics, position, angle)
    }

    /// Recreates an entity with existing vitals, e.g. from a snapshot.
    pub fn restore<P: Physics + ?Sized>(
        id: EntityId,
        genome: Genome,
        brain: Brain,
        vitals: Vitals,
        physics: &mut P,
        position: Point<f32>,
        angle: f32,
    ) -> Self {
        let physiology = Physiology::from_genome(&genome);
        let body = physics.add_body(
            BodyDesc::dynamic(position, physiology.radius, physiology.mass).with_angle(angle),
        );
        let mut vitals = vitals;
        vitals.energy = vitals.energy.clamp(0.0, physiology.max_energy);
        vitals.health = vitals.health.clamp(0.0, physiology.max_health);
        vitals.hunger = vitals.hunger.clamp(0.0, physiology.max_hunger);

        Self {
            id,
            genome,
            brain,
            body,
            response: HormoneResponse::baseline(&physiology),
            physiology,
            vitals,
            digestion: DigestionQueue::new(),
            last_activations: Activations::default(),
        }
    }

    /// Removes the body from the physics world.
    pub fn release<P: Physics + ?Sized>(&self, physics: &mut P) {
        physics.remove_body(self.body);
    }

    /// Advances the entity by one tick.
    ///
    /// Reads only its own state, the body snapshot and the world view, so
    /// updates of different entities are independent. The returned motion
    /// command and waste are applied by the caller.
    pub fn update(
        &mut self,
        body: &BodyState,
        world: &dyn WorldView,
        params: &Params,
        dt: f32,
    ) -> UpdateOutcome {
        let phys = self.physiology;

        // 1-2: sense and think
        let food = world.nearest_food(body.position);
        let inputs = sensors::assemble(&self.vitals, &phys, body, food.as_ref(), params);
        let activations = self.brain.forward_traced(&inputs);
        let forward = activations.output[0];
        let turn = activations.output[1];
        self.last_activations = activations;

        // 3: actuate
        let angle = wrap_angle(body.angle + turn * phys.turn_rate * dt);
        let speed = self.response.speed * self.vitals.energy / phys.max_energy;
        let (ux, uy) = heading_unit(angle);
        let signed_speed = forward * speed;
        let velocity = Coord {
            x: ux * signed_speed,
            y: uy * signed_speed,
        };
        self.vitals.distance_traveled += signed_speed.abs() * dt;
        let velocity_ratio = signed_speed.abs() / phys.base_speed;

        // 4: energy
        let metabolism_factor = self.response.metabolism_rate / phys.metabolism_rate;
        let hunger_multiplier = 1.0 + self.vitals.hunger / phys.max_hunger;
        let upkeep = 0.08 * dt * phys.size * metabolism_factor
            + 0.1 * dt * velocity_ratio * phys.size
            + 0.02 * dt * self.digestion.len() as f32;
        self.vitals.energy =
            (self.vitals.energy - upkeep * hunger_multiplier).clamp(0.0, phys.max_energy);

        // 5: hunger
        self.vitals.hunger = (self.vitals.hunger
            + 0.15 * dt * phys.size
            + 0.225 * dt * velocity_ratio)
            .clamp(0.0, phys.max_hunger);

        // 6: health
        if self.vitals.energy <= 0.0 {
            self.vitals.health -= params.health_decay_rate * dt;
        }
        self.vitals.health = self.vitals.health.clamp(0.0, phys.max_health);

        // 7: digestion
        let step = self.digestion.advance(dt);
        for released in &step.released {
            self.vitals.energy = (self.vitals.energy + released).min(phys.max_energy);
            self.vitals.hunger = (self.vitals.hunger - 0.5 * released).max(0.0);
        }
        let waste = step
            .completed
            .iter()
            .map(|meal| {
                (
                    meal.size * (1.0 - phys.digestion_efficiency),
                    meal.quality * 0.5,
                )
            })
            .collect();

        // 8: hormone feedback
        let neighbors = world
            .neighbors_within(body.position, self.response.sensor_range)
            .iter()
            .filter(|other| other.id != self.id)
            .count();
        self.response = HormoneResponse::compute(&self.genome, &phys, &self.vitals, neighbors);

        // 9: cooldowns
        if self.vitals.reproduction_cooldown > 0.0 {
            self.vitals.reproduction_cooldown = (self.vitals.reproduction_cooldown - dt).max(0.0);
        }
        if self.vitals.digestion_cooldown > 0.0 {
            self.vitals.digestion_cooldown = (self.vitals.digestion_cooldown - dt).max(0.0);
        }

        // 10: age
        self.vitals.age += dt;

        let death = self.death_cause(params.max_age);
        if let Some(cause) = death {
            debug!(id = self.id, ?cause, age = self.vitals.age, "entity died");
        }

        UpdateOutcome {
            command: MotionCommand { velocity, angle },
            waste,
            death,
        }
    }

    /// Termination check: health exhausted or lifespan reached.
    pub fn death_cause(&self, max_age: f32) -> Option<DeathCause> {
        if self.vitals.health <= 0.0 {
            Some(DeathCause::Exhaustion)
        } else if self.vitals.age >= max_age {
            Some(DeathCause::OldAge)
        } else {
            None
        }
    }

    /// Whether the entity is still alive under the given lifespan ceiling.
    pub fn is_alive(&self, max_age: f32) -> bool {
        self.death_cause(max_age).is_none()
    }

    /// Tries to start digesting a food item.
    ///
    /// Fails while the digestion cooldown runs or if the food does not fit the mouth.
    /// The caller removes the food on success.
    pub fn eat_food(&mut self, food: &Food) -> bool {
        if self.vitals.digestion_cooldown > 0.0 || food.size > self.physiology.mouth_size {
            return false;
        }

        let total_energy = food.energy_value
            * self.response.digestion_efficiency
            * (0.75 + 0.25 * self.physiology.mouth_teeth);
        let duration = (60.0 * food.size * (0.5 + 0.5 * food.quality)).max(1.0);

        self.digestion.push(Meal {
            remaining_energy: total_energy,
            remaining_time: duration,
            size: food.size,
            quality: food.quality,
        });
        self.vitals.food_eaten += 1;
        self.vitals.digestion_cooldown = self.physiology.digestion_cooldown;

        debug!(
            id = self.id,
            energy = total_energy,
            duration,
            queued = self.digestion.len(),
            "meal accepted"
        );
        true
    }

    /// Whether energy, cooldown and health all allow reproduction.
    pub fn can_reproduce(&self) -> bool {
        self.vitals.energy >= self.physiology.reproduction_cost
            && self.vitals.reproduction_cooldown <= 0.0
            && self.vitals.health > self.physiology.max_health * 0.7
    }

    /// Pays the reproduction cost if eligible.
    ///
    /// Offspring are bred by the generational selector; this only gates and charges.
    pub fn reproduce(&mut self, params: &Params) -> bool {
        if !self.can_reproduce() {
            return false;
        }
        self.vitals.energy -= self.physiology.reproduction_cost;
        self.vitals.reproduction_cooldown = params.reproduction_cooldown;
        self.vitals.children += 1;
        true
    }

    /// Weighted summary of survival and reproductive success, never negative.
    pub fn fitness(&self) -> f32 {
        let v = &self.vitals;
        let p = &self.physiology;
        let score = 1.0
            + 1.5 * (v.health / p.max_health)
            + 1.2 * (v.energy / p.max_energy)
            + 0.8 * (v.age / 100.0).min(1.0)
            + 1.0 * (v.food_eaten as f32 / 10.0).min(1.0)
            + 0.5 * (v.distance_traveled / 1000.0).min(1.0)
            + 1.3 * (v.children as f32 / 3.0).min(1.0);
        score.max(0.0)
    }

    /// Energy as a fraction of its maximum.
    pub fn energy_ratio(&self) -> f32 {
        self.vitals.energy / self.physiology.max_energy
    }

    /// Health as a fraction of its maximum.
    pub fn health_ratio(&self) -> f32 {
        self.vitals.health / self.physiology.max_health
    }
}

impl Locatable for Entity {
    fn body(&self) -> BodyHandle {
        self.body
    }

    fn radius(&self) -> f32 {
        self.physiology.radius
    }
}
