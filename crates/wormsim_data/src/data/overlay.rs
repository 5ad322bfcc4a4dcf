//! Display lists.
//!
//! The simulation never touches pixels. It describes each layer of a frame as
//! an ordered list of shapes in canvas coordinates, and the front-end
//! rasterizes them in order with alpha blending.

use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// 8-bit color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn gray(level: u8, a: u8) -> Self {
        Self::new(level, level, level, a)
    }

    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled disc.
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        thickness: f64,
    },
    /// Open poly-line through `points` in order.
    Polyline {
        points: Vec<Point>,
        color: Rgba,
        thickness: f64,
    },
}

impl Shape {
    #[must_use]
    pub fn color(&self) -> Rgba {
        match self {
            Shape::Circle { color, .. }
            | Shape::Line { color, .. }
            | Shape::Polyline { color, .. } => *color,
        }
    }
}

/// One transparent layer of a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    shapes: Vec<Shape>,
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgba, thickness: f64) {
        self.push(Shape::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    pub fn polyline(&mut self, points: Vec<Point>, color: Rgba, thickness: f64) {
        self.push(Shape::Polyline {
            points,
            color,
            thickness,
        });
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Overlay {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
