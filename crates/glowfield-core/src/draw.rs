//! Immediate-mode drawing context and its recorded form.

use crate::{Point, Rgba};

/// Outline style for lines and polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    /// Soft halo drawn behind the outline.
    pub glow: Option<Glow>,
}

impl Stroke {
    pub fn new(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            glow: None,
        }
    }

    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = Some(glow);
        self
    }
}

/// Shadow-style glow around a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in pixels.
    pub blur: f64,
    pub color: Rgba,
}

/// A 2D immediate-mode drawing context.
///
/// Calls are painted in order; later calls occlude earlier ones.
pub trait DrawContext {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Fill a disc whose colour fades linearly from `inner` at the centre
    /// to `outer` at `radius`.
    fn fill_radial_gradient(&mut self, center: Point, radius: f64, inner: Rgba, outer: Rgba);

    /// Stroke a closed polygon through `vertices`.
    fn stroke_polygon(&mut self, vertices: &[Point], stroke: Stroke);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    RadialGradient {
        center: Point,
        radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
    Polygon {
        vertices: Vec<Point>,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
}

/// A [`DrawContext`] that records every call for later painting.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over recorded line segments.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Stroke)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }
}

impl DrawContext for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_radial_gradient(&mut self, center: Point, radius: f64, inner: Rgba, outer: Rgba) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn stroke_polygon(&mut self, vertices: &[Point], stroke: Stroke) {
        self.commands.push(DrawCommand::Polygon {
            vertices: vertices.to_vec(),
            stroke,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MINT;

    #[test]
    fn test_records_in_call_order() {
        let mut list = DisplayList::new();
        list.fill_circle(Point::new(1.0, 1.0), 2.0, MINT.with_alpha(1.0));
        list.stroke_line(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Stroke::new(MINT.with_alpha(0.5), 0.5),
        );

        assert_eq!(list.commands().len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::Circle { .. }));
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn test_clear_empties_list() {
        let mut list = DisplayList::new();
        list.fill_circle(Point::default(), 1.0, MINT.with_alpha(1.0));
        list.clear();
        assert!(list.is_empty());
    }
}
