//! Paint a recorded frame onto a ratatui braille canvas.

use glowfield_core::{DisplayList, DrawCommand, Point, Rgb, Rgba, Size, Stroke};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Context, Line, Points},
    },
};

/// Anything fainter than this is invisible on a terminal.
const VISIBILITY_FLOOR: f64 = 0.04;
/// Spacing between the concentric rings that approximate a gradient fill.
const RING_SPACING_PX: f64 = 4.0;
const MAX_RINGS: usize = 32;
/// Circles smaller than this render as a single dot.
const DOT_RADIUS_PX: f64 = 4.0;

/// Widget painting a [`DisplayList`] recorded in surface pixel space.
#[derive(Debug, Clone, Copy)]
pub struct DisplayListWidget<'a> {
    list: &'a DisplayList,
    bounds: Size,
    background: Rgb,
}

impl<'a> DisplayListWidget<'a> {
    /// `bounds` is the pixel size the list was recorded at.
    pub fn new(list: &'a DisplayList, bounds: Size) -> Self {
        Self {
            list,
            bounds,
            background: Rgb::BLACK,
        }
    }

    /// Colour translucent strokes are blended toward.
    pub fn background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }
}

impl Widget for DisplayListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Self {
            list,
            bounds,
            background,
        } = self;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(background.into())
            .x_bounds([0.0, bounds.width])
            .y_bounds([0.0, bounds.height])
            .paint(|ctx| {
                let painter = Painter {
                    height: bounds.height,
                    background,
                };
                for command in list.commands() {
                    painter.paint(ctx, command);
                }
            })
            .render(area, buf);
    }
}

/// Maps surface pixels and translucent colours onto the canvas.
struct Painter {
    height: f64,
    background: Rgb,
}

impl Painter {
    /// Canvas y grows upward; surface y grows downward.
    fn flip(&self, p: Point) -> (f64, f64) {
        (p.x, self.height - p.y)
    }

    fn color(&self, color: Rgba) -> Option<Color> {
        (color.alpha >= VISIBILITY_FLOOR).then(|| color.over(self.background).into())
    }

    fn paint(&self, ctx: &mut Context, command: &DrawCommand) {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                let Some(color) = self.color(*color) else {
                    return;
                };
                let (x, y) = self.flip(*center);
                if *radius >= DOT_RADIUS_PX {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: *radius,
                        color,
                    });
                }
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
            }
            DrawCommand::RadialGradient {
                center,
                radius,
                inner,
                outer,
            } => self.paint_gradient(ctx, *center, *radius, *inner, *outer),
            DrawCommand::Polygon { vertices, stroke } => {
                if let Some(glow) = stroke.glow {
                    let halo = expand(vertices, glow.blur / 4.0);
                    self.paint_outline(ctx, &halo, glow.color.fade(glow.blur / 20.0));
                }
                self.paint_outline(ctx, vertices, stroke.color);
            }
            DrawCommand::Line { from, to, stroke } => self.paint_line(ctx, *from, *to, stroke),
        }
    }

    /// Concentric rings from the rim inward so the bright core wins.
    fn paint_gradient(
        &self,
        ctx: &mut Context,
        center: Point,
        radius: f64,
        inner: Rgba,
        outer: Rgba,
    ) {
        if radius <= 0.0 {
            return;
        }
        let (x, y) = self.flip(center);
        let rings = ((radius / RING_SPACING_PX).ceil() as usize).clamp(1, MAX_RINGS);
        for ring in (1..=rings).rev() {
            let t = ring as f64 / rings as f64;
            let alpha = inner.alpha + (outer.alpha - inner.alpha) * t;
            if let Some(color) = self.color(Rgba::new(inner.rgb, alpha)) {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius * t,
                    color,
                });
            }
        }
        if let Some(color) = self.color(inner) {
            ctx.draw(&Points {
                coords: &[(x, y)],
                color,
            });
        }
    }

    fn paint_outline(&self, ctx: &mut Context, vertices: &[Point], color: Rgba) {
        let Some(color) = self.color(color) else {
            return;
        };
        for (i, from) in vertices.iter().enumerate() {
            let to = vertices[(i + 1) % vertices.len()];
            let (x1, y1) = self.flip(*from);
            let (x2, y2) = self.flip(to);
            ctx.draw(&Line::new(x1, y1, x2, y2, color));
        }
    }

    fn paint_line(&self, ctx: &mut Context, from: Point, to: Point, stroke: &Stroke) {
        let Some(color) = self.color(stroke.color) else {
            return;
        };
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);
        ctx.draw(&Line::new(x1, y1, x2, y2, color));
    }
}

/// Push every vertex `offset` pixels further from the centroid.
fn expand(vertices: &[Point], offset: f64) -> Vec<Point> {
    if vertices.is_empty() {
        return Vec::new();
    }
    let n = vertices.len() as f64;
    let centroid = Point::new(
        vertices.iter().map(|v| v.x).sum::<f64>() / n,
        vertices.iter().map(|v| v.y).sum::<f64>() / n,
    );
    vertices
        .iter()
        .map(|v| {
            let dist = v.distance(centroid);
            if dist == 0.0 {
                *v
            } else {
                let scale = (dist + offset) / dist;
                Point::new(
                    centroid.x + (v.x - centroid.x) * scale,
                    centroid.y + (v.y - centroid.y) * scale,
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glowfield_core::{DrawContext, MINT};

    use super::*;

    const BLANK: [&str; 2] = [" ", "\u{2800}"];

    fn render(list: &DisplayList) -> Buffer {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        DisplayListWidget::new(list, Size::new(160.0, 160.0)).render(area, &mut buf);
        buf
    }

    fn drawn_cells(buf: &Buffer) -> usize {
        buf.content
            .iter()
            .filter(|c| !BLANK.contains(&c.symbol()))
            .count()
    }

    #[test]
    fn test_visible_line_is_drawn() {
        let mut list = DisplayList::new();
        list.stroke_line(
            Point::new(0.0, 80.0),
            Point::new(160.0, 80.0),
            Stroke::new(MINT.with_alpha(0.8), 0.8),
        );
        assert!(drawn_cells(&render(&list)) >= 10);
    }

    #[test]
    fn test_faint_line_is_skipped() {
        let mut list = DisplayList::new();
        list.stroke_line(
            Point::new(0.0, 80.0),
            Point::new(160.0, 80.0),
            Stroke::new(MINT.with_alpha(0.01), 0.01),
        );
        assert_eq!(drawn_cells(&render(&list)), 0);
    }

    #[test]
    fn test_translucent_colour_is_blended() {
        let mut list = DisplayList::new();
        list.fill_circle(Point::new(80.0, 80.0), 2.0, MINT.with_alpha(0.5));
        let buf = render(&list);
        let cell = buf
            .content
            .iter()
            .find(|c| !BLANK.contains(&c.symbol()))
            .expect("particle drawn");
        assert_eq!(cell.fg, Color::from(MINT.with_alpha(0.5).over(Rgb::BLACK)));
    }

    #[test]
    fn test_empty_gradient_draws_nothing() {
        let mut list = DisplayList::new();
        list.fill_radial_gradient(
            Point::new(80.0, 80.0),
            0.0,
            MINT.with_alpha(0.8),
            MINT.with_alpha(0.0),
        );
        assert_eq!(drawn_cells(&render(&list)), 0);
    }

    #[test]
    fn test_expand_moves_vertices_outward() {
        let square = [
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
        ];
        let halo = expand(&square, 2.0_f64.sqrt());
        assert!((halo[2].x - 2.0).abs() < 1e-9);
        assert!((halo[2].y - 2.0).abs() < 1e-9);
    }
}
