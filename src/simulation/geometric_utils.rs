//! Geometric helpers for positions, bearings and world bounds.

use std::f32::consts::{PI, TAU};

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use rand::Rng;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point<f32>, b: Point<f32>) -> f32 {
    Euclidean.distance(a, b)
}

/// Bearing of the vector `(dx, dy)` normalized to [-1, 1].
///
/// # Arguments
///
/// * `dx` - Horizontal component
/// * `dy` - Vertical component
///
/// # Returns
///
/// `atan2(dy, dx) / π`, which is 0 for the zero vector.
#[inline]
pub fn normalized_bearing(dx: f32, dy: f32) -> f32 {
    dy.atan2(dx) / PI
}

/// Wraps an angle into `[-π, π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Unit vector pointing along `angle`.
#[inline]
pub fn heading_unit(angle: f32) -> (f32, f32) {
    (angle.cos(), angle.sin())
}

/// Clamps a point into the rectangle `[margin, width - margin] × [margin, height - margin]`.
///
/// # Arguments
///
/// * `p` - Point to clamp
/// * `width` - World width
/// * `height` - World height
/// * `margin` - Distance kept from every wall
///
/// # Returns
///
/// The closest point inside the margin-inset rectangle.
pub fn clamp_to_bounds(p: Point<f32>, width: f32, height: f32, margin: f32) -> Point<f32> {
    Point::new(
        p.x().clamp(margin, (width - margin).max(margin)),
        p.y().clamp(margin, (height - margin).max(margin)),
    )
}

/// Samples a point uniformly inside the margin-inset world rectangle.
pub fn random_point_in_bounds<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    margin: f32,
) -> Point<f32> {
    Point::new(
        sample_axis(rng, margin, width - margin),
        sample_axis(rng, margin, height - margin),
    )
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}
