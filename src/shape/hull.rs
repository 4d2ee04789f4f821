//! Vertex-backed primitives: everything whose support point is one of a finite vertex set.

use super::{Polygon, Support};
use crate::{broad::BoundingSphere, error::ShapeError, Fp, Vec2};

/// Shared storage of a finite-vertex shape. `V` is a fixed array for the fixed-size primitives
/// and a `Vec` for polygons.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Hull<V> {
    relative: V,
    absolute: V,
    /// Local centroid, the mean of the relative vertices.
    offset: Vec2,
    sphere: BoundingSphere,
    position: Vec2,
}

impl<V: AsRef<[Vec2]> + AsMut<[Vec2]> + Clone> Hull<V> {
    pub(crate) fn new(relative: V) -> Result<Hull<V>, ShapeError> {
        let verts = relative.as_ref();
        if verts.is_empty() {
            return Err(ShapeError::NoVertices);
        }
        if verts.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite);
        }

        let offset = verts.iter().fold(Vec2::ZERO, |acc, &v| acc + v) / verts.len() as Fp;
        let radius = verts
            .iter()
            .map(|&v| v.distance_squared(offset))
            .fold(0.0, Fp::max)
            .sqrt();

        Ok(Hull {
            absolute: relative.clone(),
            relative,
            offset,
            sphere: BoundingSphere::new(offset, radius),
            position: Vec2::ZERO,
        })
    }

    #[inline]
    pub(crate) fn relative(&self) -> &[Vec2] {
        self.relative.as_ref()
    }
    #[inline]
    pub(crate) fn absolute(&self) -> &[Vec2] {
        self.absolute.as_ref()
    }
    #[inline]
    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }
}

impl<V: AsRef<[Vec2]> + AsMut<[Vec2]> + Clone> Support for Hull<V> {
    fn support_point(&self, dir: Vec2) -> Vec2 {
        farthest(self.absolute.as_ref(), dir)
    }
    #[inline]
    fn centroid(&self) -> Vec2 {
        self.sphere.center
    }
    #[inline]
    fn bounding_sphere(&self) -> BoundingSphere {
        self.sphere
    }
    #[inline]
    fn vertex_count(&self) -> Option<usize> {
        Some(self.relative.as_ref().len())
    }

    fn adjust(&mut self, position: Vec2) {
        let absolute = self.absolute.as_mut();
        for (abs, &rel) in absolute.iter_mut().zip(self.relative.as_ref()) {
            *abs = position + rel;
        }
        self.position = position;
        self.sphere = self.sphere.translated(position + self.offset);
    }
}

/// Returns the vertex with the greatest projection onto `dir`, the first one on ties.
pub(crate) fn farthest(verts: &[Vec2], dir: Vec2) -> Vec2 {
    let mut best = verts[0];
    let mut best_dot = best.dot(dir);
    for &v in &verts[1..] {
        let dot = v.dot(dir);
        if dot > best_dot {
            best = v;
            best_dot = dot;
        }
    }
    best
}

/// Forwards `Support` and the vertex accessors of a hull-backed primitive to its `hull`.
macro_rules! hull_primitive {
    ($($t:ty),*) => {
        $(
            impl $t {
                /// Vertices in world space, as of the last `adjust`.
                #[inline]
                pub fn vertices(&self) -> &[Vec2] {
                    self.hull.absolute()
                }
                /// Vertices relative to the owning object's position.
                #[inline]
                pub fn relative_vertices(&self) -> &[Vec2] {
                    self.hull.relative()
                }
                #[inline]
                pub fn position(&self) -> Vec2 {
                    self.hull.position()
                }
            }

            impl Support for $t {
                #[inline]
                fn support_point(&self, dir: Vec2) -> Vec2 {
                    self.hull.support_point(dir)
                }
                #[inline]
                fn centroid(&self) -> Vec2 {
                    self.hull.centroid()
                }
                #[inline]
                fn bounding_sphere(&self) -> BoundingSphere {
                    self.hull.bounding_sphere()
                }
                #[inline]
                fn vertex_count(&self) -> Option<usize> {
                    self.hull.vertex_count()
                }
                #[inline]
                fn adjust(&mut self, position: Vec2) {
                    self.hull.adjust(position)
                }
            }
        )*
    };
}

// ---------- Primitives ---------- //

/// A single point. Its support point is itself in every direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    hull: Hull<[Vec2; 1]>,
}
impl Point {
    pub fn new(at: Vec2) -> Result<Point, ShapeError> {
        Ok(Point { hull: Hull::new([at])? })
    }
}

/// A line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    hull: Hull<[Vec2; 2]>,
}
impl Line {
    pub fn new(a: Vec2, b: Vec2) -> Result<Line, ShapeError> {
        let hull = Hull::new([a, b])?;
        if a == b {
            return Err(ShapeError::DegenerateLine);
        }
        Ok(Line { hull })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    hull: Hull<[Vec2; 3]>,
}
impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Result<Triangle, ShapeError> {
        let hull = Hull::new([a, b, c])?;
        if (b - a).perp_dot(c - a) == 0.0 {
            return Err(ShapeError::DegenerateTriangle);
        }
        Ok(Triangle { hull })
    }
}

/// An axis-aligned rectangle, relative to its owner's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    hull: Hull<[Vec2; 4]>,
}
impl Rectangle {
    /// A `width` by `height` rectangle centered on the local origin.
    pub fn new(width: Fp, height: Fp) -> Result<Rectangle, ShapeError> {
        let half = Vec2::new(width, height) * 0.5;
        Rectangle::from_corners(-half, half)
    }

    pub fn from_corners(min: Vec2, max: Vec2) -> Result<Rectangle, ShapeError> {
        let (width, height) = (max.x - min.x, max.y - min.y);
        if !(width > 0.0 && height > 0.0) {
            if !width.is_finite() || !height.is_finite() {
                return Err(ShapeError::NonFinite);
            }
            return Err(ShapeError::InvalidExtents { width: width as f64, height: height as f64 });
        }
        // counter-clockwise from the bottom left
        let hull = Hull::new([min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)])?;
        Ok(Rectangle { hull })
    }

    pub fn width(&self) -> Fp {
        let v = self.hull.relative();
        v[1].x - v[0].x
    }
    pub fn height(&self) -> Fp {
        let v = self.hull.relative();
        v[2].y - v[1].y
    }
}

hull_primitive!(Point, Line, Triangle, Rectangle, Polygon);
