//! Transient wormhole vortex.

use std::f64::consts::TAU;

use glowfield_core::{DrawContext, Point, Rgb, Size, Stroke};
use rand::Rng;

use super::random_point;

pub const MAX_RADIUS: f64 = 100.0;
pub const GROWTH_RATE: f64 = 0.5;
const ROTATION_STEP: f64 = 0.02;
/// Peak displacement applied to a particle sitting on the vortex centre.
const PULL_STRENGTH: f64 = 5.0;
const RING_SIDES: usize = 6;
const RING_SCALE: f64 = 0.8;
const RING_ALPHA: f64 = 0.7;
const RING_WIDTH: f64 = 2.0;
const CORE_ALPHA: f64 = 0.8;

/// Whether a vortex is still on screen after advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Collapsed,
}

/// A growing-then-shrinking swirl that draws nearby particles inward.
#[derive(Debug, Clone, PartialEq)]
pub struct Vortex {
    pub center: Point,
    pub radius: f64,
    pub max_radius: f64,
    /// Radius change per frame; negative while shrinking.
    pub growth_rate: f64,
    pub rotation: f64,
}

impl Vortex {
    /// A fresh vortex at `center`, starting from nothing.
    pub fn new(center: Point) -> Self {
        Self {
            center,
            radius: 0.0,
            max_radius: MAX_RADIUS,
            growth_rate: GROWTH_RATE,
            rotation: 0.0,
        }
    }

    /// A fresh vortex at a random spot on the surface.
    pub fn spawn(bounds: Size, rng: &mut impl Rng) -> Self {
        Self::new(random_point(bounds, rng))
    }

    pub fn is_shrinking(&self) -> bool {
        self.growth_rate < 0.0
    }

    /// Grow or shrink one frame and spin.
    ///
    /// Returns [`Lifecycle::Collapsed`] once the radius reaches zero while
    /// shrinking; the caller drops the vortex on that frame.
    pub fn advance(&mut self, speed: f64) -> Lifecycle {
        self.radius += self.growth_rate * speed;
        self.rotation += ROTATION_STEP * speed;

        if self.is_shrinking() {
            if self.radius <= 0.0 {
                self.radius = 0.0;
                return Lifecycle::Collapsed;
            }
        } else if self.radius > self.max_radius {
            self.radius = self.max_radius;
            self.growth_rate = -self.growth_rate;
        }
        Lifecycle::Active
    }

    /// Displacement pulling a point at `position` toward the centre.
    ///
    /// Falls off linearly from `PULL_STRENGTH * speed` at the centre to zero
    /// at the rim; `None` outside the radius.
    pub fn pull(&self, position: Point, speed: f64) -> Option<Point> {
        let dx = position.x - self.center.x;
        let dy = position.y - self.center.y;
        let distance = dx.hypot(dy);
        if distance >= self.radius {
            return None;
        }

        let angle = dy.atan2(dx);
        let force = (self.radius - distance) / self.radius * PULL_STRENGTH * speed;
        Some(Point::new(-angle.cos() * force, -angle.sin() * force))
    }

    pub fn render(&self, ctx: &mut impl DrawContext, accent: Rgb) {
        ctx.fill_radial_gradient(
            self.center,
            self.radius,
            accent.with_alpha(CORE_ALPHA),
            accent.with_alpha(0.0),
        );

        let ring: Vec<Point> = (0..RING_SIDES)
            .map(|i| {
                let angle = self.rotation + i as f64 / RING_SIDES as f64 * TAU;
                self.center.offset_polar(self.radius * RING_SCALE, angle)
            })
            .collect();
        ctx.stroke_polygon(&ring, Stroke::new(accent.with_alpha(RING_ALPHA), RING_WIDTH));
    }
}
