//! Configuration file handling for glowfield.
//!
//! The config lives at `<config dir>/glowfield/config.toml`. Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glowfield_core::{Rgb, SceneConfig, hsl_to_rgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour translucent strokes are blended toward.
    pub background: Rgb,
    /// Pixels represented by one terminal cell, horizontally.
    pub cell_width_px: f64,
    /// Pixels represented by one terminal cell, vertically.
    pub cell_height_px: f64,
    /// Replaces the scene accent with HSL(hue, 100%, 80%) when set.
    pub accent_hue: Option<f32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            accent_hue: None,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scene: SceneConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Platform config file location, if a home directory can be resolved.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glowfield").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config from the platform location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load the config at `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_toml(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;
        if !(scene.link_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scene.link_distance must be positive, got {}",
                scene.link_distance
            )));
        }
        if scene.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "scene.frame_interval_ms must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&scene.vortex_spawn_rate) {
            return Err(ConfigError::Invalid(format!(
                "scene.vortex_spawn_rate must be within 0..=1, got {}",
                scene.vortex_spawn_rate
            )));
        }
        if !(self.display.cell_width_px > 0.0 && self.display.cell_height_px > 0.0) {
            return Err(ConfigError::Invalid(
                "display cell sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Scene settings with the display overrides applied.
    pub fn resolved_scene(&self) -> SceneConfig {
        let mut scene = self.scene;
        if let Some(hue) = self.display.accent_hue {
            scene.accent = hsl_to_rgb(hue, 1.0, 0.8);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use glowfield_core::MINT;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.scene.particle_count, 50);
        assert_eq!(config.scene.link_distance, 150.0);
        assert_eq!(config.scene.pentagon_count, 5);
        assert_eq!(config.scene.vortex_spawn_rate, 0.002);
        assert_eq!(config.scene.accent, MINT);
        assert_eq!(config.display.background, Rgb::BLACK);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            r#"
            [scene]
            particle_count = 80
            seed = 7
            accent = [255, 0, 128]

            [display]
            cell_width_px = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(config.scene.particle_count, 80);
        assert_eq!(config.scene.seed, Some(7));
        assert_eq!(config.scene.accent, Rgb::new(255, 0, 128));
        assert_eq!(config.scene.link_distance, 150.0);
        assert_eq!(config.display.cell_width_px, 10.0);
        assert_eq!(config.display.cell_height_px, 16.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Config::from_toml("[scene]\nlink_distance = 0.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[scene]\nframe_interval_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[scene]\nvortex_spawn_rate = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[display]\ncell_height_px = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::from_toml("[scene\nparticle_count = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("glowfield-does-not-exist/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_accent_hue_override() {
        let config = Config::from_toml("[display]\naccent_hue = 0.0").unwrap();
        let scene = config.resolved_scene();
        assert_eq!(scene.accent.r, 255);
        assert_ne!(scene.accent, MINT);
    }
}
