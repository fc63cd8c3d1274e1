//! Sensor assembly and the read-only world query interface.
//!
//! Sensors turn an entity's own state plus what it can see of the world into
//! the eight normalized inputs of its controller.

use geo::Point;

use super::super::brain::INPUT_SIZE;
use super::super::geometric_utils::normalized_bearing;
use super::super::params::Params;
use super::super::physics::BodyState;
use super::{EntityId, Physiology, Vitals};

/// Nearest food as seen from a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSighting {
    /// Index of the food item in the world's food list.
    pub index: usize,
    /// Center of the food item.
    pub position: Point<f32>,
    /// Distance from the query point.
    pub distance: f32,
}

/// Another entity near a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRef {
    /// Identity of the entity.
    pub id: EntityId,
    /// Center of the entity.
    pub position: Point<f32>,
    /// Distance from the query point.
    pub distance: f32,
}

/// Read-only view of the world offered to entities during their update.
///
/// Implementations must be shareable across the parallel update phase.
pub trait WorldView: Sync {
    /// Closest food item to `position`, if any food exists.
    fn nearest_food(&self, position: Point<f32>) -> Option<FoodSighting>;

    /// Entities whose centers lie within `radius` of `position`.
    fn neighbors_within(&self, position: Point<f32>, radius: f32) -> Vec<EntityRef>;
}

/// World with no food and no entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWorld;

impl WorldView for EmptyWorld {
    fn nearest_food(&self, _position: Point<f32>) -> Option<FoodSighting> {
        None
    }

    fn neighbors_within(&self, _position: Point<f32>, _radius: f32) -> Vec<EntityRef> {
        Vec::new()
    }
}

/// Maps a ratio in [0, 1] onto [-1, 1].
#[inline]
fn signed(ratio: f32) -> f32 {
    ratio * 2.0 - 1.0
}

/// Builds the controller inputs.
///
/// Order: energy, hunger, health, age, food distance, food bearing,
/// movement bearing, speed. Every value is clamped to [-1, 1].
pub fn assemble(
    vitals: &Vitals,
    physiology: &Physiology,
    body: &BodyState,
    food: Option<&FoodSighting>,
    params: &Params,
) -> [f32; INPUT_SIZE] {
    let (food_distance, food_bearing) = match food {
        Some(sighting) => (
            1.0 - 2.0 * (sighting.distance / params.food_sense_horizon).min(1.0),
            normalized_bearing(
                sighting.position.x() - body.position.x(),
                sighting.position.y() - body.position.y(),
            ),
        ),
        None => (-1.0, 0.0),
    };

    let velocity = body.velocity;
    let speed_ratio = if physiology.base_speed > 0.0 {
        (body.speed() / physiology.base_speed).min(1.0)
    } else {
        0.0
    };

    [
        signed(vitals.energy / physiology.max_energy),
        signed(vitals.hunger / physiology.max_hunger),
        signed(vitals.health / physiology.max_health),
        signed(vitals.age / params.age_normalization),
        food_distance,
        food_bearing,
        normalized_bearing(velocity.x, velocity.y),
        signed(speed_ratio),
    ]
    .map(|value| value.clamp(-1.0, 1.0))
}
