//! Points and sizes in surface pixel space (y grows downward).

/// A position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point `radius` away from `self` in direction `angle` (radians).
    pub fn offset_polar(self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
