//! Colour primitives and blending.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// The default accent: a soft mint green.
pub const MINT: Rgb = Rgb::new(152, 255, 152);

/// An opaque 24-bit colour.
///
/// Serialized as a `[r, g, b]` array so config files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an opacity to this colour.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba::new(self, alpha)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// A colour with opacity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// Create a colour, clamping alpha into `0.0..=1.0`.
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Same colour with the opacity multiplied by `factor`.
    pub fn fade(self, factor: f64) -> Self {
        Self::new(self.rgb, self.alpha * factor)
    }

    /// Composite this colour over an opaque background.
    ///
    /// Terminals have no alpha channel, so translucency is expressed by
    /// mixing toward the background.
    pub fn over(self, background: Rgb) -> Rgb {
        let mix = |fg: u8, bg: u8| {
            let fg = fg as f64;
            let bg = bg as f64;
            (bg + (fg - bg) * self.alpha).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.rgb.r, background.r),
            mix(self.rgb.g, background.g),
            mix(self.rgb.b, background.b),
        )
    }
}

/// Convert HSL to RGB colour.
///
/// `h` is in degrees, `s` and `l` in `0.0..=1.0`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgb::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
