//! World stepper: owns entities, food, waste and the physics world.
//!
//! A tick advances physics, updates every entity in parallel against a
//! snapshot of the world, resolves eating serially, and then applies the
//! queued events (motion, food removal, waste, deaths) in a fixed order.

use std::f32::consts::TAU;

use geo::Point;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::brain::Brain;
use super::entity::{DeathCause, Entity, EntityId, UpdateOutcome};
use super::error::ConfigError;
use super::events::{self, EventQueue, SimulationEvent};
use super::food::Food;
use super::genome::Genome;
use super::geometric_utils::{clamp_to_bounds, distance, random_point_in_bounds};
use super::params::Params;
use super::physics::{BodyState, Physics, Space};
use super::rng::{SimRng, create_rng};
use super::spatial::SpatialIndex;
use super::stats::GenerationHistory;
use super::waste::Waste;

/// Largest radius a food item can have, used to widen collision queries.
const MAX_FOOD_RADIUS: f32 = 15.0;

/// The simulated world.
#[derive(Debug)]
pub struct Ecosystem<P: Physics = Space> {
    /// Simulation parameters.
    pub params: Params,
    /// Physics collaborator owning every body.
    pub physics: P,
    /// Living entities.
    pub entities: Vec<Entity>,
    /// Food items.
    pub food: Vec<Food>,
    /// Decaying waste.
    pub waste: Vec<Waste>,
    /// Total simulated time.
    pub time: f32,
    /// Number of ticks run.
    pub ticks: u64,
    /// Generation counter, incremented by each replacement.
    pub generation: u32,
    /// Summaries recorded before each generational replacement.
    pub history: GenerationHistory,
    pub(crate) rng: SimRng,
    pub(crate) next_id: EntityId,
    selected: Option<EntityId>,
}

impl Ecosystem<Space> {
    /// Creates a populated world with the bundled physics and an RNG seeded from `params.seed`.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        params.validate()?;
        let physics = Space::new(params.world_width, params.world_height);
        let rng = create_rng(params.seed);
        let mut ecosystem = Self::empty(params, physics, rng);
        ecosystem.populate();
        Ok(ecosystem)
    }
}

impl<P: Physics> Ecosystem<P> {
    /// Creates a world with no entities, food or waste.
    pub fn empty(params: Params, physics: P, rng: SimRng) -> Self {
        Self {
            params,
            physics,
            entities: Vec::new(),
            food: Vec::new(),
            waste: Vec::new(),
            time: 0.0,
            ticks: 0,
            generation: 0,
            history: GenerationHistory::default(),
            rng,
            next_id: 0,
            selected: None,
        }
    }

    /// Spawns the configured initial entities and food.
    pub fn populate(&mut self) {
        for _ in 0..self.params.initial_entities {
            self.spawn_entity(None, None);
        }
        for _ in 0..self.params.initial_food {
            self.spawn_food(None);
        }
    }

    /// Mutable access to the simulation RNG.
    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// Random point inside the wall margin.
    pub fn random_position(&mut self) -> Point<f32> {
        random_point_in_bounds(
            &mut self.rng,
            self.params.world_width,
            self.params.world_height,
            self.params.wall_margin,
        )
    }

    /// Creates an entity with a fresh brain at the given or a random position,
    /// with the given or a random genome.
    ///
    /// # Returns
    ///
    /// The identity of the new entity.
    pub fn spawn_entity(&mut self, position: Option<Point<f32>>, genome: Option<Genome>) -> EntityId {
        let genome = genome.unwrap_or_else(|| Genome::new_random(&mut self.rng));
        let brain = Brain::new_random(&mut self.rng);
        self.spawn_entity_with_brain(position, genome, brain)
    }

    /// Creates an entity from an explicit genome and brain.
    pub fn spawn_entity_with_brain(
        &mut self,
        position: Option<Point<f32>>,
        genome: Genome,
        brain: Brain,
    ) -> EntityId {
        let position = match position {
            Some(p) => p,
            None => self.random_position(),
        };
        let angle = self.rng.random_range(0.0..TAU);
        let id = self.allocate_id();
        let entity = Entity::spawn(id, genome, brain, &mut self.physics, position, angle);
        self.entities.push(entity);
        id
    }

    /// Creates a random food item at the given or a random position.
    ///
    /// # Returns
    ///
    /// Index of the new item in the food list.
    pub fn spawn_food(&mut self, position: Option<Point<f32>>) -> usize {
        let position = match position {
            Some(p) => p,
            None => self.random_position(),
        };
        let food = Food::new_random(&mut self.physics, position, &mut self.rng);
        self.food.push(food);
        self.food.len() - 1
    }

    /// Creates waste at `position`, clamped into the wall margin.
    pub fn spawn_waste(&mut self, position: Point<f32>, size: f32, quality: f32) {
        let position = clamp_to_bounds(
            position,
            self.params.world_width,
            self.params.world_height,
            self.params.wall_margin,
        );
        let waste = Waste::new(&mut self.physics, position, size, quality);
        self.waste.push(waste);
    }

    /// Ages every waste item by one tick and removes decayed ones.
    pub fn age_waste(&mut self) {
        let physics = &mut self.physics;
        self.waste.retain_mut(|waste| {
            if waste.update() {
                waste.release(physics);
                false
            } else {
                true
            }
        });
    }

    /// Removes entities by identity and releases their bodies.
    pub fn remove_entities(&mut self, ids: &[EntityId]) {
        let physics = &mut self.physics;
        self.entities.retain(|entity| {
            if ids.contains(&entity.id) {
                entity.release(physics);
                false
            } else {
                true
            }
        });
        if self.selected.is_some_and(|id| ids.contains(&id)) {
            self.selected = None;
        }
    }

    /// Removes every entity and releases their bodies.
    pub fn clear_entities(&mut self) {
        for entity in self.entities.drain(..) {
            entity.release(&mut self.physics);
        }
        self.selected = None;
    }

    /// Looks up a living entity by identity.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Mutable lookup of a living entity by identity.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Selects the nearest entity whose body contains `point`.
    pub fn select_at(&mut self, point: Point<f32>) -> Option<&Entity> {
        self.selected = self
            .entities
            .iter()
            .filter_map(|e| {
                let body = self.physics.body(e.body)?;
                let d = distance(body.position, point);
                (d <= e.physiology.radius).then_some((e.id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);
        self.selected()
    }

    /// Currently selected entity, if it is still alive.
    pub fn selected(&self) -> Option<&Entity> {
        self.selected.and_then(|id| self.entity(id))
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Advances the world by `dt`.
    pub fn tick(&mut self, dt: f32) {
        // 1: physics
        self.physics.step(dt);
        self.time += dt;
        self.ticks += 1;

        let bodies: Vec<Option<BodyState>> = self
            .entities
            .iter()
            .map(|e| self.physics.body(e.body).filter(is_finite_body))
            .collect();
        let index = self.build_index(&bodies);

        // 2: parallel entity updates against the snapshot
        let params = &self.params;
        let outcomes: Vec<Option<UpdateOutcome>> = self
            .entities
            .par_iter_mut()
            .zip(bodies.par_iter())
            .map(|(entity, body)| {
                body.as_ref()
                    .map(|body| entity.update(body, &index, params, dt))
            })
            .collect();

        let mut queue = EventQueue::new();
        let mut dying = vec![false; self.entities.len()];
        for (i, (entity, outcome)) in self.entities.iter_mut().zip(outcomes).enumerate() {
            let Some(outcome) = outcome else {
                warn!(id = entity.id, "entity has no usable physics body, removing");
                dying[i] = true;
                queue.push(SimulationEvent::EntityDied {
                    entity_id: entity.id,
                    cause: DeathCause::BodyLost,
                });
                continue;
            };

            queue.push(SimulationEvent::Moved {
                body: entity.body,
                command: outcome.command,
            });

            if let Some(body) = &bodies[i] {
                for (size, quality) in outcome.waste {
                    queue.push(SimulationEvent::WasteExpelled {
                        position: body.position,
                        size,
                        quality,
                    });
                }
            }

            match outcome.death {
                Some(cause) => {
                    dying[i] = true;
                    queue.push(SimulationEvent::EntityDied {
                        entity_id: entity.id,
                        cause,
                    });
                }
                None => {
                    if self.params.auto_reproduce && entity.reproduce(&self.params) {
                        debug!(id = entity.id, children = entity.vitals.children, "reproduced");
                    }
                }
            }
        }

        // 3: eating
        self.resolve_eating(&bodies, &index, &dying, &mut queue);

        // 4-6: waste, decay, removals
        events::apply_events(self, queue);
    }

    /// Lets every surviving entity eat at most one overlapping food item.
    fn resolve_eating(
        &mut self,
        bodies: &[Option<BodyState>],
        index: &SpatialIndex,
        dying: &[bool],
        queue: &mut EventQueue,
    ) {
        let mut taken = vec![false; self.food.len()];
        for (i, entity) in self.entities.iter_mut().enumerate() {
            if dying[i] {
                continue;
            }
            let Some(body) = &bodies[i] else { continue };

            let reach = entity.physiology.radius + MAX_FOOD_RADIUS;
            for (food_index, dist) in index.food_within(body.position, reach) {
                if taken[food_index] {
                    continue;
                }
                let food = &self.food[food_index];
                if dist >= entity.physiology.radius + food.radius {
                    continue;
                }
                if entity.eat_food(food) {
                    taken[food_index] = true;
                    queue.push(SimulationEvent::FoodEaten {
                        entity_id: entity.id,
                        food_index,
                    });
                }
                break;
            }
        }
    }

    fn build_index(&self, bodies: &[Option<BodyState>]) -> SpatialIndex {
        let food = self.food.iter().map(|f| f.position).collect();
        let entities = self
            .entities
            .iter()
            .zip(bodies)
            .filter_map(|(e, body)| body.map(|b| (e.id, b.position)))
            .collect();
        SpatialIndex::build(food, entities)
    }

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn is_finite_body(body: &BodyState) -> bool {
    body.position.x().is_finite() && body.position.y().is_finite()
}
