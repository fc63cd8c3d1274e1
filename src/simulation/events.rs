//! Deferred world mutations.
//!
//! Entity updates run in parallel and may only touch their own state. Anything
//! that changes shared state (physics bodies, food, waste, the population) is
//! queued as an event and applied serially once every update has finished.

use geo::Point;

use super::ecosystem::Ecosystem;
use super::entity::{DeathCause, EntityId, MotionCommand};
use super::physics::{BodyHandle, Physics};

/// A change to shared simulation state.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// New velocity and heading for an entity's body.
    Moved {
        /// Body to drive.
        body: BodyHandle,
        /// Velocity and heading to write.
        command: MotionCommand,
    },
    /// An entity accepted a food item, which leaves the world.
    FoodEaten {
        /// Entity that ate.
        entity_id: EntityId,
        /// Index of the food item in the food list.
        food_index: usize,
    },
    /// A meal finished digesting and leaves waste behind.
    WasteExpelled {
        /// Where the waste appears.
        position: Point<f32>,
        /// Waste size.
        size: f32,
        /// Waste quality.
        quality: f32,
    },
    /// An entity died and must be removed.
    EntityDied {
        /// Entity that died.
        entity_id: EntityId,
        /// Why it died.
        cause: DeathCause,
    },
}

/// Ordered buffer of events produced during a tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Queued events in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SimulationEvent> {
        self.events.iter()
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }
}

/// Applies queued events in world-step order: motion, eaten food, new waste,
/// waste decay, then removal of dead entities.
pub fn apply_events<P: Physics>(state: &mut Ecosystem<P>, mut queue: EventQueue) {
    let mut eaten = Vec::new();
    let mut expelled = Vec::new();
    let mut dead = Vec::new();

    for event in queue.drain() {
        match event {
            SimulationEvent::Moved { body, command } => {
                state.physics.set_velocity(body, command.velocity);
                state.physics.set_angle(body, command.angle);
            }
            SimulationEvent::FoodEaten { food_index, .. } => eaten.push(food_index),
            SimulationEvent::WasteExpelled {
                position,
                size,
                quality,
            } => expelled.push((position, size, quality)),
            SimulationEvent::EntityDied { entity_id, .. } => dead.push(entity_id),
        }
    }

    // Remove in descending index order so earlier indices stay valid
    eaten.sort_unstable();
    eaten.dedup();
    for &food_index in eaten.iter().rev() {
        if food_index < state.food.len() {
            let food = state.food.remove(food_index);
            food.release(&mut state.physics);
        }
    }
    if state.params.respawn_eaten_food {
        for _ in &eaten {
            state.spawn_food(None);
        }
    }

    for (position, size, quality) in expelled {
        state.spawn_waste(position, size, quality);
    }

    state.age_waste();

    if !dead.is_empty() {
        state.remove_entities(&dead);
    }
}
