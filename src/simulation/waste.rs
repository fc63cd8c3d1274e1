//! Decaying byproducts of completed digestion.

use geo::Point;

use super::locatable::Locatable;
use super::physics::{BodyDesc, BodyHandle, Physics};

/// A piece of waste left behind by a finished meal.
#[derive(Debug, Clone, PartialEq)]
pub struct Waste {
    /// Backing static body.
    pub body: BodyHandle,
    /// Center of the waste. Waste never moves.
    pub position: Point<f32>,
    /// Size inherited from the digested meal.
    pub size: f32,
    /// Quality inherited from the digested meal.
    pub quality: f32,
    /// Ticks since creation.
    pub age: f32,
    /// Age at which the waste disappears.
    pub decay_time: f32,
    /// Collision radius.
    pub radius: f32,
}

impl Waste {
    /// Creates waste and registers its body.
    pub fn new<P: Physics + ?Sized>(
        physics: &mut P,
        position: Point<f32>,
        size: f32,
        quality: f32,
    ) -> Self {
        let radius = 3.0 * size;
        let body = physics.add_body(BodyDesc::fixed(position, radius));
        let position = physics.body(body).map_or(position, |state| state.position);
        Self {
            body,
            position,
            size,
            quality,
            age: 0.0,
            decay_time: 300.0 * size,
            radius,
        }
    }

    /// Ages the waste by one tick.
    ///
    /// # Returns
    ///
    /// `true` once the waste has fully decayed.
    pub fn update(&mut self) -> bool {
        self.age += 1.0;
        self.is_decayed()
    }

    /// Whether the waste has reached its decay time.
    pub fn is_decayed(&self) -> bool {
        self.age >= self.decay_time
    }

    /// Fraction of lifetime remaining, for fading out in renderers.
    pub fn freshness(&self) -> f32 {
        if self.decay_time <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.decay_time).clamp(0.0, 1.0)
    }

    /// Removes the backing body from the physics world.
    pub fn release<P: Physics + ?Sized>(&self, physics: &mut P) {
        physics.remove_body(self.body);
    }
}

impl Locatable for Waste {
    fn body(&self) -> BodyHandle {
        self.body
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
