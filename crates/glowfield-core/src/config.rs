//! Construction-time scene settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{MINT, Rgb};

/// Settings fixed when a scene is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of drifting particles.
    pub particle_count: usize,
    /// Particles closer than this (pixels) are linked.
    pub link_distance: f64,
    /// Number of rotating pentagons.
    pub pentagon_count: usize,
    /// Per-frame vortex spawn probability at animation speed 1.0.
    pub vortex_spawn_rate: f64,
    /// Delay between frames in milliseconds.
    pub frame_interval_ms: u64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Hue every entity is drawn in.
    pub accent: Rgb,
}

impl SceneConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            link_distance: 150.0,
            pentagon_count: 5,
            vortex_spawn_rate: 0.002,
            frame_interval_ms: 16,
            seed: None,
            accent: MINT,
        }
    }
}
