//! Drifting glowing particles.

use glowfield_core::{DrawContext, Point, Rgb, Size};
use rand::Rng;

use super::{bounce, oscillate, random_point};

/// Velocity components are clamped to `[-MAX_VELOCITY, MAX_VELOCITY]`.
pub const MAX_VELOCITY: f64 = 2.0;
pub const MIN_OPACITY: f64 = 0.5;
pub const MAX_OPACITY: f64 = 1.0;
/// Per-frame random nudge applied to each velocity component.
const VELOCITY_JITTER: f64 = 0.05;

/// A small glowing point that wanders around the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub radius: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub opacity: f64,
    /// Signed opacity change per frame.
    pub pulse_rate: f64,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn new(position: Point, radius: f64) -> Self {
        Self {
            position,
            radius,
            velocity_x: 0.0,
            velocity_y: 0.0,
            opacity: MAX_OPACITY,
            pulse_rate: 0.01,
        }
    }

    /// A particle with random placement, size, drift and pulse.
    pub fn random(bounds: Size, rng: &mut impl Rng) -> Self {
        let pulse = rng.gen_range(0.01..0.03);
        Self {
            position: random_point(bounds, rng),
            radius: rng.gen_range(2.0..5.0),
            velocity_x: rng.gen_range(-1.0..1.0),
            velocity_y: rng.gen_range(-1.0..1.0),
            opacity: rng.gen_range(MIN_OPACITY..MAX_OPACITY),
            pulse_rate: if rng.gen_bool(0.5) { pulse } else { -pulse },
        }
    }

    /// Move one frame, bounce off edges, pulse, and jitter the velocity.
    pub fn advance(&mut self, speed: f64, bounds: Size, rng: &mut impl Rng) {
        self.position.x += self.velocity_x * speed;
        self.position.y += self.velocity_y * speed;

        self.velocity_x = bounce(self.position.x, bounds.width, self.velocity_x);
        self.velocity_y = bounce(self.position.y, bounds.height, self.velocity_y);

        oscillate(
            &mut self.opacity,
            &mut self.pulse_rate,
            MIN_OPACITY,
            MAX_OPACITY,
        );

        self.velocity_x = (self.velocity_x + rng.gen_range(-VELOCITY_JITTER..VELOCITY_JITTER))
            .clamp(-MAX_VELOCITY, MAX_VELOCITY);
        self.velocity_y = (self.velocity_y + rng.gen_range(-VELOCITY_JITTER..VELOCITY_JITTER))
            .clamp(-MAX_VELOCITY, MAX_VELOCITY);
    }

    pub fn render(&self, ctx: &mut impl DrawContext, accent: Rgb) {
        ctx.fill_circle(self.position, self.radius, accent.with_alpha(self.opacity));
    }
}
