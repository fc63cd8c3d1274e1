//! Renderer collaborator interface.
//!
//! The core never owns a renderer. Callers build an [`Appearance`] per entity
//! and hand it to whatever renderer they constructed.

use geo::Point;

use super::brain::Activations;
use super::entity::{Entity, EntityId};
use super::genome::{Category, Trait};
use super::physics::Physics;

/// Read-only visual description of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Entity identity.
    pub id: EntityId,
    /// Body center.
    pub position: Point<f32>,
    /// Heading in radians.
    pub heading: f32,
    /// Body radius.
    pub radius: f32,
    /// Effective value of every trait.
    pub traits: Vec<(Category, Trait, f32)>,
    /// Health over max health.
    pub health_ratio: f32,
    /// Energy over max energy.
    pub energy_ratio: f32,
    /// Activations of the latest forward pass.
    pub activations: Activations,
}

/// Something that can draw entities.
pub trait Renderer {
    /// Draws one entity.
    fn draw_entity(&mut self, appearance: &Appearance);
}

impl Entity {
    /// Builds the visual description of this entity, or `None` if its body is gone.
    pub fn appearance<P: Physics + ?Sized>(&self, physics: &P) -> Option<Appearance> {
        let body = physics.body(self.body)?;
        Some(Appearance {
            id: self.id,
            position: body.position,
            heading: body.angle,
            radius: self.physiology.radius,
            traits: self.genome.trait_map(),
            health_ratio: self.health_ratio(),
            energy_ratio: self.energy_ratio(),
            activations: self.last_activations.clone(),
        })
    }
}
