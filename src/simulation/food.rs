//! Food items entities can eat.
//!
//! Food sits on a static physics body. Its energy value is fixed at creation
//! from its size and quality.

use geo::Point;
use rand::Rng;

use super::locatable::Locatable;
use super::physics::{BodyDesc, BodyHandle, Physics};

/// Energy of a food item of unit size and quality.
const ENERGY_PER_UNIT: f32 = 50.0;

/// A food item resting in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    /// Backing static body.
    pub body: BodyHandle,
    /// Center of the item. Food never moves.
    pub position: Point<f32>,
    /// Size in [0.2, 1.0].
    pub size: f32,
    /// Quality in [0, 1].
    pub quality: f32,
    /// Energy released by a complete digestion before efficiency factors.
    pub energy_value: f32,
    /// Collision radius.
    pub radius: f32,
}

impl Food {
    /// Creates a food item with explicit size and quality and registers its body.
    ///
    /// # Arguments
    ///
    /// * `physics` - Physics world that will own the body
    /// * `position` - Center of the item
    /// * `size` - Item size, scales radius and energy
    /// * `quality` - Item quality, scales energy and digestion time
    pub fn new<P: Physics + ?Sized>(
        physics: &mut P,
        position: Point<f32>,
        size: f32,
        quality: f32,
    ) -> Self {
        let radius = 5.0 + 10.0 * size;
        let body = physics.add_body(BodyDesc::fixed(position, radius));
        let position = physics.body(body).map_or(position, |state| state.position);
        Self {
            body,
            position,
            size,
            quality,
            energy_value: ENERGY_PER_UNIT * size * quality,
            radius,
        }
    }

    /// Creates a food item with random size in [0.2, 1.0) and quality in [0, 1).
    pub fn new_random<P: Physics + ?Sized, R: Rng + ?Sized>(
        physics: &mut P,
        position: Point<f32>,
        rng: &mut R,
    ) -> Self {
        let size = rng.random_range(0.2..1.0);
        let quality = rng.random_range(0.0..1.0);
        Self::new(physics, position, size, quality)
    }

    /// Removes the backing body from the physics world.
    pub fn release<P: Physics + ?Sized>(&self, physics: &mut P) {
        physics.remove_body(self.body);
    }
}

impl Locatable for Food {
    fn body(&self) -> BodyHandle {
        self.body
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
