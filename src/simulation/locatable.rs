//! Trait for simulation objects backed by a physics body.

use geo::Point;

use super::physics::{BodyHandle, Physics};

/// Anything that owns a body in the physics collaborator.
///
/// Positions are never stored on the object itself; they are read from the
/// physics world through the body handle.
pub trait Locatable {
    /// Handle of the backing physics body.
    fn body(&self) -> BodyHandle;

    /// Collision radius of the body.
    fn radius(&self) -> f32;

    /// Current position, or `None` if the body was already removed.
    fn position<P: Physics + ?Sized>(&self, physics: &P) -> Option<Point<f32>> {
        physics.body(self.body()).map(|state| state.position)
    }
}
