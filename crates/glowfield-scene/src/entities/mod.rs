//! Scene entities.

mod particle;
mod pentagon;
mod vortex;

pub use particle::Particle;
pub use pentagon::Pentagon;
pub use vortex::{Lifecycle, Vortex};

use glowfield_core::{Point, Size};
use rand::Rng;

/// Uniformly random point on a surface of the given size.
fn random_point(bounds: Size, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.gen_range(0.0..1.0) * bounds.width,
        rng.gen_range(0.0..1.0) * bounds.height,
    )
}

/// Velocity after touching the `[0, extent]` walls.
///
/// The sign is forced away from the wall so an entity left outside after a
/// resize heads back in instead of flickering.
fn bounce(position: f64, extent: f64, velocity: f64) -> f64 {
    if position < 0.0 {
        velocity.abs()
    } else if position > extent {
        -velocity.abs()
    } else {
        velocity
    }
}

/// Step `value` by `step`, reversing `step` when `value` leaves `[min, max]`.
fn oscillate(value: &mut f64, step: &mut f64, min: f64, max: f64) {
    *value += *step;
    if *value > max || *value < min {
        *step = -*step;
        *value = value.clamp(min, max);
    }
}
