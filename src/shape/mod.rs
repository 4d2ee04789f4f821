//! Convex primitives and their support functions.
//!
//! Every shape holds its geometry twice: relative to its owner, fixed at construction, and in
//! world space, rewritten by [`Support::adjust`]. Centroid and bounding sphere radius are
//! computed once; adjusting only moves the sphere.

mod circle;
mod hull;
mod polygon;

pub use circle::Circle;
pub use hull::{Line, Point, Rectangle, Triangle};
pub use polygon::Polygon;

use crate::{broad::BoundingSphere, Vec2};

/// A convex shape described by its support function.
pub trait Support {
    /// Returns the point of the shape farthest along `dir`.
    fn support_point(&self, dir: Vec2) -> Vec2;
    /// World space centroid.
    fn centroid(&self) -> Vec2;
    fn bounding_sphere(&self) -> BoundingSphere;
    /// Size of the finite vertex set the support point is picked from, `None` for curved shapes.
    fn vertex_count(&self) -> Option<usize>;
    /// Moves the shape's world space geometry to `position`. Call once per tick, before querying.
    fn adjust(&mut self, position: Vec2);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Triangle(Triangle),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

/// Binds the inner primitive of a `Shape` to `$s` and evaluates `$e` for it.
macro_rules! shape_match {
    ($shape:expr, $s:ident => $e:expr) => {
        match $shape {
            Shape::Point($s) => $e,
            Shape::Line($s) => $e,
            Shape::Circle($s) => $e,
            Shape::Triangle($s) => $e,
            Shape::Rectangle($s) => $e,
            Shape::Polygon($s) => $e,
        }
    };
}

impl Shape {
    /// The position last passed to `adjust`, the origin before the first.
    pub fn position(&self) -> Vec2 {
        shape_match!(self, s => s.position())
    }

    /// World space vertices; empty for circles.
    pub fn vertices(&self) -> &[Vec2] {
        match self {
            Shape::Circle(_) => &[],
            Shape::Point(s) => s.vertices(),
            Shape::Line(s) => s.vertices(),
            Shape::Triangle(s) => s.vertices(),
            Shape::Rectangle(s) => s.vertices(),
            Shape::Polygon(s) => s.vertices(),
        }
    }

    pub fn is_curved(&self) -> bool {
        self.vertex_count().is_none()
    }
}

impl Support for Shape {
    #[inline]
    fn support_point(&self, dir: Vec2) -> Vec2 {
        shape_match!(self, s => s.support_point(dir))
    }
    #[inline]
    fn centroid(&self) -> Vec2 {
        shape_match!(self, s => s.centroid())
    }
    #[inline]
    fn bounding_sphere(&self) -> BoundingSphere {
        shape_match!(self, s => s.bounding_sphere())
    }
    #[inline]
    fn vertex_count(&self) -> Option<usize> {
        shape_match!(self, s => s.vertex_count())
    }
    #[inline]
    fn adjust(&mut self, position: Vec2) {
        shape_match!(self, s => s.adjust(position))
    }
}

impl From<Point> for Shape {
    fn from(point: Point) -> Self {
        Shape::Point(point)
    }
}
impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}
impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}
impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}
impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}
impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
