use super::Support;
use crate::{broad::BoundingSphere, error::ShapeError, Fp, Vec2};

/// A circle. Its support function is closed-form; it has no finite vertex set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center relative to the owner's position.
    offset: Vec2,
    rad: Fp,
    sphere: BoundingSphere,
    position: Vec2,
}

impl Circle {
    pub fn new(offset: Vec2, rad: Fp) -> Result<Circle, ShapeError> {
        if !offset.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if !rad.is_finite() || rad < 0.0 {
            return Err(ShapeError::InvalidRadius(rad as f64));
        }
        Ok(Circle { offset, rad, sphere: BoundingSphere::new(offset, rad), position: Vec2::ZERO })
    }

    #[inline]
    pub fn radius(&self) -> Fp {
        self.rad
    }
    /// World space center, as of the last `adjust`.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.sphere.center
    }
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl Support for Circle {
    #[inline]
    fn support_point(&self, dir: Vec2) -> Vec2 {
        // a zero direction has no farthest point, the center stands in for one
        self.sphere.center + dir.normalize_or_zero() * self.rad
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
        None
    }
    #[inline]
    fn adjust(&mut self, position: Vec2) {
        self.position = position;
        self.sphere = self.sphere.translated(position + self.offset);
    }
}
