//! Broadphase data and logic module.

mod sweep;

pub use sweep::sweep_pairs;

use crate::{Fp, Vec2};

/// A bounding circle. A negative result of [`BoundingSphere::intersects`] rules out any overlap
/// of the enclosed shapes; a positive one only says the spheres overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec2,
    pub radius: Fp,
}

impl BoundingSphere {
    #[inline]
    pub fn new(center: Vec2, radius: Fp) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// Same radius, new center.
    #[inline]
    pub fn translated(self, center: Vec2) -> BoundingSphere {
        BoundingSphere { center, radius: self.radius }
    }

    #[inline]
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        // (ra + rb)^2, expanded
        let (ra, rb) = (self.radius, other.radius);
        self.center.distance_squared(other.center) <= ra * ra + 2.0 * ra * rb + rb * rb
    }

    /// The sphere's extent along the x axis, `(min, max)`.
    #[inline]
    pub fn x_extent(&self) -> (Fp, Fp) {
        (self.center.x - self.radius, self.center.x + self.radius)
    }
    #[inline]
    pub fn y_extent(&self) -> (Fp, Fp) {
        (self.center.y - self.radius, self.center.y + self.radius)
    }
}
