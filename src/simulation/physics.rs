//! Physics collaborator interface and a bundled kinematic implementation.
//!
//! The simulation core only talks to bodies through [`Physics`]. [`Space`] is a
//! small integrator that is good enough for headless runs and tests: explicit
//! Euler on forces and velocities, positions clamped by the walls, and overlap
//! tests for contacts. It performs no collision response.

use geo::{Coord, Point};
use slotmap::{SlotMap, new_key_type};

use super::geometric_utils::distance;

new_key_type! {
    /// Stable handle to a body owned by a physics world.
    pub struct BodyHandle;
}

/// Whether a body is moved by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves; used for food and waste.
    Static,
    /// Integrated every step; used for entities.
    Dynamic,
}

/// Parameters for creating a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Static or dynamic.
    pub kind: BodyKind,
    /// Initial center.
    pub position: Point<f32>,
    /// Initial orientation in radians.
    pub angle: f32,
    /// Circle radius.
    pub radius: f32,
    /// Mass, ignored for static bodies.
    pub mass: f32,
}

impl BodyDesc {
    /// Dynamic circular body.
    pub fn dynamic(position: Point<f32>, radius: f32, mass: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position,
            angle: 0.0,
            radius,
            mass,
        }
    }

    /// Static circular body.
    pub fn fixed(position: Point<f32>, radius: f32) -> Self {
        Self {
            kind: BodyKind::Static,
            position,
            angle: 0.0,
            radius,
            mass: 0.0,
        }
    }

    /// Sets the initial orientation.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

/// Snapshot of a body as seen by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Static or dynamic.
    pub kind: BodyKind,
    /// Center.
    pub position: Point<f32>,
    /// Orientation in radians.
    pub angle: f32,
    /// Linear velocity.
    pub velocity: Coord<f32>,
    /// Circle radius.
    pub radius: f32,
    /// Mass.
    pub mass: f32,
    /// Moment of inertia.
    pub moment: f32,
}

impl BodyState {
    /// Magnitude of the linear velocity.
    pub fn speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.y)
    }
}

/// Moment of inertia of a hollow circle (`inner_radius` = 0 for a solid disc).
pub fn moment_for_circle(mass: f32, inner_radius: f32, outer_radius: f32) -> f32 {
    mass * (inner_radius * inner_radius + outer_radius * outer_radius) / 2.0
}

/// Interface the simulation uses to drive bodies.
pub trait Physics {
    /// Adds a body and returns its handle.
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Removes a body. Returns `false` if the handle was stale.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// Current state of a body.
    fn body(&self, handle: BodyHandle) -> Option<BodyState>;

    /// Overwrites the linear velocity of a body.
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Coord<f32>);

    /// Overwrites the orientation of a body.
    fn set_angle(&mut self, handle: BodyHandle, angle: f32);

    /// Teleports a body.
    fn set_position(&mut self, handle: BodyHandle, position: Point<f32>);

    /// Accumulates a force applied during the next step.
    fn apply_force(&mut self, handle: BodyHandle, force: Coord<f32>);

    /// Whether the circles of two bodies overlap.
    fn in_contact(&self, a: BodyHandle, b: BodyHandle) -> bool {
        match (self.body(a), self.body(b)) {
            (Some(a), Some(b)) => distance(a.position, b.position) < a.radius + b.radius,
            _ => false,
        }
    }

    /// Advances every dynamic body by `dt`.
    fn step(&mut self, dt: f32);

    /// Number of live bodies.
    fn body_count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Body {
    state: BodyState,
    force: Coord<f32>,
}

/// Kinematic physics world bounded by four walls.
#[derive(Debug, Clone)]
pub struct Space {
    bodies: SlotMap<BodyHandle, Body>,
    width: f32,
    height: f32,
}

impl Space {
    /// Creates an empty world of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            width,
            height,
        }
    }

    /// World width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World height.
    pub fn height(&self) -> f32 {
        self.height
    }

    fn confine(&self, position: Point<f32>, radius: f32) -> Point<f32> {
        confine(position, radius, self.width, self.height)
    }
}

impl Physics for Space {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let moment = match desc.kind {
            BodyKind::Dynamic => moment_for_circle(desc.mass, 0.0, desc.radius),
            BodyKind::Static => 0.0,
        };
        let position = self.confine(desc.position, desc.radius);
        self.bodies.insert(Body {
            state: BodyState {
                kind: desc.kind,
                position,
                angle: desc.angle,
                velocity: Coord { x: 0.0, y: 0.0 },
                radius: desc.radius,
                mass: desc.mass,
                moment,
            },
            force: Coord { x: 0.0, y: 0.0 },
        })
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies.remove(handle).is_some()
    }

    fn body(&self, handle: BodyHandle) -> Option<BodyState> {
        self.bodies.get(handle).map(|b| b.state)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Coord<f32>) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.state.kind == BodyKind::Dynamic {
                body.state.velocity = velocity;
            }
        }
    }

    fn set_angle(&mut self, handle: BodyHandle, angle: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.state.angle = angle;
        }
    }

    fn set_position(&mut self, handle: BodyHandle, position: Point<f32>) {
        let Some(radius) = self.bodies.get(handle).map(|b| b.state.radius) else {
            return;
        };
        let position = self.confine(position, radius);
        if let Some(body) = self.bodies.get_mut(handle) {
            body.state.position = position;
        }
    }

    fn apply_force(&mut self, handle: BodyHandle, force: Coord<f32>) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.force = body.force + force;
        }
    }

    fn step(&mut self, dt: f32) {
        let (width, height) = (self.width, self.height);
        for body in self.bodies.values_mut() {
            if body.state.kind == BodyKind::Static {
                body.force = Coord { x: 0.0, y: 0.0 };
                continue;
            }

            let state = &mut body.state;
            if state.mass > 0.0 {
                state.velocity = state.velocity + body.force * (dt / state.mass);
            }
            body.force = Coord { x: 0.0, y: 0.0 };

            let moved = Point::new(
                state.position.x() + state.velocity.x * dt,
                state.position.y() + state.velocity.y * dt,
            );
            state.position = confine(moved, state.radius, width, height);
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

/// Keeps a circle of `radius` inside the walls.
fn confine(position: Point<f32>, radius: f32, width: f32, height: f32) -> Point<f32> {
    let r_x = radius.min(width / 2.0);
    let r_y = radius.min(height / 2.0);
    Point::new(
        position.x().clamp(r_x, width - r_x),
        position.y().clamp(r_y, height - r_y),
    )
}
