//! Scene state and the per-frame update.

use glowfield_core::{DrawContext, SceneConfig, Size, Stroke};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::entities::{Lifecycle, Particle, Pentagon, Vortex};

/// Lower bound of the global animation speed.
pub const MIN_SPEED: f64 = 0.5;
/// Upper bound of the global animation speed.
pub const MAX_SPEED: f64 = 1.5;
/// Width of the random walk applied to the speed each frame.
const SPEED_DRIFT: f64 = 0.02;

/// Linear link falloff: `1.0` at distance zero, `0.0` at and beyond `threshold`.
pub fn link_falloff(distance: f64, threshold: f64) -> f64 {
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// Everything on screen plus the state driving it.
#[derive(Debug)]
pub struct Scene {
    particles: Vec<Particle>,
    pentagons: Vec<Pentagon>,
    /// At most one vortex is alive at a time.
    vortex: Option<Vortex>,
    /// Global multiplier applied to all motion.
    speed: f64,
    bounds: Size,
    config: SceneConfig,
    rng: StdRng,
    frame: u64,
}

impl Scene {
    /// Seed a scene for a surface of the given size.
    pub fn new(bounds: Size, config: &SceneConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(bounds, config, rng)
    }

    /// Seed a scene using the given random source.
    pub fn with_rng(bounds: Size, config: &SceneConfig, mut rng: StdRng) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(bounds, &mut rng))
            .collect();
        let pentagons = (0..config.pentagon_count)
            .map(|_| Pentagon::random(bounds, &mut rng))
            .collect();

        tracing::debug!(
            particles = config.particle_count,
            pentagons = config.pentagon_count,
            width = bounds.width,
            height = bounds.height,
            "seeded scene"
        );

        Self {
            particles,
            pentagons,
            vortex: None,
            speed: 1.0,
            bounds,
            config: *config,
            rng,
            frame: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pentagons(&self) -> &[Pentagon] {
        &self.pentagons
    }

    pub fn vortex(&self) -> Option<&Vortex> {
        self.vortex.as_ref()
    }

    /// Replace the current vortex.
    pub fn set_vortex(&mut self, vortex: Option<Vortex>) {
        self.vortex = vortex;
    }

    /// Spawn a vortex at a random spot unless one is already active.
    pub fn spawn_vortex(&mut self) -> bool {
        if self.vortex.is_some() {
            return false;
        }
        let vortex = Vortex::spawn(self.bounds, &mut self.rng);
        tracing::debug!(x = vortex.center.x, y = vortex.center.y, "vortex spawned");
        self.vortex = Some(vortex);
        true
    }

    /// Current animation speed, always within `[MIN_SPEED, MAX_SPEED]`.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Number of frames simulated so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Adopt new surface dimensions. Entities keep their positions.
    pub fn resize(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Simulate and draw one frame.
    ///
    /// Paint order is vortex, then pentagons, then particles with their links.
    pub fn tick(&mut self, ctx: &mut impl DrawContext) {
        let speed = self.speed;
        let bounds = self.bounds;
        let accent = self.config.accent;
        let threshold = self.config.link_distance;

        ctx.clear();

        let collapsed = match self.vortex.as_mut() {
            Some(vortex) => match vortex.advance(speed) {
                Lifecycle::Active => {
                    vortex.render(ctx, accent);
                    false
                }
                Lifecycle::Collapsed => true,
            },
            None => false,
        };
        if collapsed {
            tracing::debug!(frame = self.frame, "vortex collapsed");
            self.vortex = None;
        }

        for pentagon in &mut self.pentagons {
            pentagon.advance(speed, bounds);
            pentagon.render(ctx, accent);
        }

        for i in 0..self.particles.len() {
            if let Some(vortex) = &self.vortex
                && let Some(pull) = vortex.pull(self.particles[i].position, speed)
            {
                let particle = &mut self.particles[i];
                particle.position.x += pull.x;
                particle.position.y += pull.y;
            }

            let particle = &mut self.particles[i];
            particle.advance(speed, bounds, &mut self.rng);
            particle.render(ctx, accent);

            // Later particles have not moved yet this frame
            let origin = self.particles[i].position;
            for other in &self.particles[i + 1..] {
                let distance = origin.distance(other.position);
                if distance < threshold {
                    let strength = link_falloff(distance, threshold);
                    ctx.stroke_line(
                        origin,
                        other.position,
                        Stroke::new(accent.with_alpha(strength), strength),
                    );
                }
            }
        }

        if self.vortex.is_none()
            && self.rng.gen_range(0.0..1.0) < self.config.vortex_spawn_rate * speed
        {
            self.spawn_vortex();
        }

        self.speed = (self.speed + self.rng.gen_range(-SPEED_DRIFT / 2.0..SPEED_DRIFT / 2.0))
            .clamp(MIN_SPEED, MAX_SPEED);
        self.frame += 1;
        tracing::trace!(frame = self.frame, speed = self.speed, "frame simulated");
    }
}

#[cfg(test)]
mod tests {
    use glowfield_core::{DisplayList, DrawCommand, Point};

    use super::*;

    fn seeded(config: SceneConfig) -> Scene {
        Scene::with_rng(Size::new(800.0, 600.0), &config, StdRng::seed_from_u64(42))
    }

    fn quiet_config() -> SceneConfig {
        SceneConfig {
            vortex_spawn_rate: 0.0,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_link_falloff() {
        assert_eq!(link_falloff(0.0, 150.0), 1.0);
        assert_eq!(link_falloff(150.0, 150.0), 0.0);
        assert_eq!(link_falloff(200.0, 150.0), 0.0);
        assert_eq!(link_falloff(75.0, 150.0), 0.5);

        let mut previous = link_falloff(0.0, 150.0);
        for d in 1..=150 {
            let current = link_falloff(d as f64, 150.0);
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn test_counts_survive_a_tick() {
        let mut scene = seeded(quiet_config());
        let mut list = DisplayList::new();
        scene.tick(&mut list);

        assert_eq!(scene.particles().len(), 50);
        assert_eq!(scene.pentagons().len(), 5);
        assert!(scene.vortex().is_none());
        assert_eq!(scene.frame_count(), 1);
    }

    #[test]
    fn test_speed_stays_in_bounds() {
        let mut scene = seeded(SceneConfig {
            particle_count: 3,
            ..SceneConfig::default()
        });
        let mut list = DisplayList::new();
        for _ in 0..20_000 {
            scene.tick(&mut list);
            assert!((MIN_SPEED..=MAX_SPEED).contains(&scene.speed()));
        }
    }

    #[test]
    fn test_forced_vortex_is_removed_after_collapse() {
        let mut scene = seeded(quiet_config());
        let mut vortex = Vortex::new(Point::new(400.0, 300.0));
        vortex.radius = 5.0;
        vortex.growth_rate = -0.5;
        scene.set_vortex(Some(vortex));

        let mut list = DisplayList::new();
        for _ in 0..11 {
            scene.tick(&mut list);
            if let Some(v) = scene.vortex() {
                assert!(v.radius > 0.0 && v.radius <= v.max_radius);
            }
        }
        assert!(scene.vortex().is_none());
    }

    #[test]
    fn test_collapse_frame_draws_no_vortex() {
        let mut scene = seeded(SceneConfig {
            particle_count: 0,
            pentagon_count: 0,
            ..quiet_config()
        });
        let mut vortex = Vortex::new(Point::new(400.0, 300.0));
        vortex.radius = 0.1;
        vortex.growth_rate = -0.5;
        scene.set_vortex(Some(vortex));

        let mut list = DisplayList::new();
        scene.tick(&mut list);
        assert!(scene.vortex().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_link_at_threshold_is_not_drawn() {
        let mut scene = seeded(SceneConfig {
            particle_count: 2,
            pentagon_count: 0,
            ..quiet_config()
        });
        scene.particles[0] = Particle::new(Point::new(100.0, 100.0), 3.0);
        scene.particles[1] = Particle::new(Point::new(250.0, 100.0), 3.0);

        let mut list = DisplayList::new();
        scene.tick(&mut list);
        assert_eq!(list.lines().count(), 0);
    }

    #[test]
    fn test_overlapping_particles_draw_full_link() {
        let mut scene = seeded(SceneConfig {
            particle_count: 2,
            pentagon_count: 0,
            ..quiet_config()
        });
        scene.particles[0] = Particle::new(Point::new(100.0, 100.0), 3.0);
        scene.particles[1] = Particle::new(Point::new(100.0, 100.0), 3.0);

        // Particles at rest do not move on their first frame
        let mut list = DisplayList::new();
        scene.tick(&mut list);
        let links: Vec<_> = list.lines().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].2.color.alpha, 1.0);
        assert_eq!(links[0].2.width, 1.0);
    }

    #[test]
    fn test_draw_order() {
        let mut scene = seeded(SceneConfig {
            particle_count: 2,
            pentagon_count: 2,
            ..quiet_config()
        });
        let mut vortex = Vortex::new(Point::new(400.0, 300.0));
        vortex.radius = 50.0;
        scene.set_vortex(Some(vortex));

        let mut list = DisplayList::new();
        scene.tick(&mut list);
        let kinds: Vec<&str> = list
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::RadialGradient { .. } => "gradient",
                DrawCommand::Polygon { .. } => "polygon",
                DrawCommand::Circle { .. } => "circle",
                DrawCommand::Line { .. } => "line",
            })
            .filter(|k| *k != "line")
            .collect();
        assert_eq!(
            kinds,
            ["gradient", "polygon", "polygon", "polygon", "circle", "circle"]
        );
    }

    #[test]
    fn test_tick_clears_previous_frame() {
        let mut scene = seeded(quiet_config());
        let mut list = DisplayList::new();
        scene.tick(&mut list);
        scene.tick(&mut list);
        let circles = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 50);
    }

    #[test]
    fn test_vortex_attracts_particle() {
        let mut scene = seeded(SceneConfig {
            particle_count: 1,
            pentagon_count: 0,
            ..quiet_config()
        });
        let center = Point::new(400.0, 300.0);
        let mut vortex = Vortex::new(center);
        vortex.radius = 100.0;
        vortex.growth_rate = 0.0;
        scene.set_vortex(Some(vortex));
        scene.particles[0] = Particle::new(Point::new(450.0, 300.0), 3.0);

        let mut list = DisplayList::new();
        scene.tick(&mut list);
        // Pull of 2.5 toward the centre dwarfs the particle's own drift
        assert!(scene.particles()[0].position.x < 448.0);
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut scene = seeded(quiet_config());
        let before: Vec<Point> = scene.particles().iter().map(|p| p.position).collect();
        scene.resize(Size::new(400.0, 300.0));
        let after: Vec<Point> = scene.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(scene.bounds(), Size::new(400.0, 300.0));
        assert_eq!(scene.particles().len(), 50);
    }

    #[test]
    fn test_spawn_vortex_only_when_absent() {
        let mut scene = seeded(quiet_config());
        assert!(scene.spawn_vortex());
        assert!(!scene.spawn_vortex());
        let v = scene.vortex().unwrap();
        assert_eq!(v.radius, 0.0);
        assert!((0.0..=800.0).contains(&v.center.x));
        assert!((0.0..=600.0).contains(&v.center.y));
    }

    #[test]
    fn test_vortex_eventually_spawns() {
        let mut scene = seeded(SceneConfig {
            particle_count: 0,
            pentagon_count: 0,
            vortex_spawn_rate: 1.0,
            ..SceneConfig::default()
        });
        let mut list = DisplayList::new();
        scene.tick(&mut list);
        // rate * speed >= 1 at speed 1.0
        assert!(scene.vortex().is_some());
    }

    #[test]
    fn test_seeded_scenes_are_reproducible() {
        let config = SceneConfig {
            seed: Some(9),
            ..SceneConfig::default()
        };
        let a = Scene::new(Size::new(800.0, 600.0), &config);
        let b = Scene::new(Size::new(800.0, 600.0), &config);
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.pentagons(), b.pentagons());
    }
}
