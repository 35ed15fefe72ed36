//! Animated particle-network background.
//!
//! A [`Scene`] owns drifting particles linked by proximity lines, an
//! occasional attracting vortex, and rotating glowing pentagons. An
//! [`Animation`] drives the scene frame by frame on any
//! [`Surface`](glowfield_core::Surface), and [`DisplayListWidget`] paints the
//! recorded frame onto a ratatui canvas.

mod animation;
mod entities;
mod render;
mod scene;

pub use animation::{Animation, AnimationHandle, FrameStatus, ResizeObserver, start};
pub use entities::{Lifecycle, Particle, Pentagon, Vortex};
pub use render::DisplayListWidget;
pub use scene::{MAX_SPEED, MIN_SPEED, Scene, link_falloff};
