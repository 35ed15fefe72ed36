//! Slowly rotating glowing pentagon outlines.

use std::f64::consts::TAU;

use glowfield_core::{DrawContext, Glow, Point, Rgb, Size, Stroke};
use rand::Rng;

use super::{bounce, oscillate, random_point};

const SIDES: usize = 5;
const GLOW_STEP: f64 = 0.05;
const MAX_BLUR: f64 = 20.0;
const GLOW_ALPHA: f64 = 0.5;
const STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Pentagon {
    pub center: Point,
    /// Distance from the centre to each vertex.
    pub size: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    /// Glow intensity in `[0, 1]`.
    pub glow: f64,
    /// Signed glow change per frame.
    pub glow_step: f64,
}

impl Pentagon {
    pub fn new(center: Point, size: f64) -> Self {
        Self {
            center,
            size,
            rotation: 0.0,
            rotation_speed: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            glow: 0.0,
            glow_step: GLOW_STEP,
        }
    }

    pub fn random(bounds: Size, rng: &mut impl Rng) -> Self {
        Self {
            center: random_point(bounds, rng),
            size: rng.gen_range(20.0..50.0),
            rotation: 0.0,
            rotation_speed: rng.gen_range(-0.01..0.01),
            velocity_x: rng.gen_range(-0.5..0.5),
            velocity_y: rng.gen_range(-0.5..0.5),
            glow: 0.0,
            glow_step: GLOW_STEP,
        }
    }

    /// Drift, spin and pulse the glow by one frame.
    ///
    /// The glow pulses at a fixed rate regardless of `speed`.
    pub fn advance(&mut self, speed: f64, bounds: Size) {
        self.center.x += self.velocity_x * speed;
        self.center.y += self.velocity_y * speed;
        self.rotation += self.rotation_speed * speed;

        self.velocity_x = bounce(self.center.x, bounds.width, self.velocity_x);
        self.velocity_y = bounce(self.center.y, bounds.height, self.velocity_y);

        oscillate(&mut self.glow, &mut self.glow_step, 0.0, 1.0);
    }

    pub fn vertices(&self) -> [Point; SIDES] {
        std::array::from_fn(|i| {
            let angle = self.rotation + i as f64 / SIDES as f64 * TAU;
            self.center.offset_polar(self.size, angle)
        })
    }

    pub fn render(&self, ctx: &mut impl DrawContext, accent: Rgb) {
        let mut stroke = Stroke::new(accent.with_alpha(0.5 + self.glow * 0.5), STROKE_WIDTH);
        if self.glow > 0.0 {
            stroke = stroke.with_glow(Glow {
                blur: MAX_BLUR * self.glow,
                color: accent.with_alpha(GLOW_ALPHA),
            });
        }
        ctx.stroke_polygon(&self.vertices(), stroke);
    }
}
