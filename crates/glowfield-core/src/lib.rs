//! Core types shared by the glowfield crates.
//!
//! This crate holds the geometry and colour primitives, the immediate-mode
//! [`DrawContext`] the scene paints on, the [`Surface`] abstraction a host
//! hands to the animation, and the construction-time [`SceneConfig`].

mod color;
mod config;
mod draw;
mod geometry;
mod surface;

pub use color::{MINT, Rgb, Rgba, hsl_to_rgb};
pub use config::SceneConfig;
pub use draw::{DisplayList, DrawCommand, DrawContext, Glow, Stroke};
pub use geometry::{Point, Size};
pub use surface::{DisplaySurface, Surface};
