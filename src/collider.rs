//! Colliders: a shape plus the filter deciding what it may hit.

use crate::{
    config::CollisionConfig,
    filter::{layers_match, LayerMask, Tags},
    narrow::{epa, gjk},
    shape::{Shape, Support},
    Fp, Vec2,
};

/// A shape with its collision filter.
///
/// Passive colliders are meant to be targets only. That is a contract for the calling loop
/// (see [`crate::broad::sweep_pairs`]); the pairwise queries here ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    shape: Shape,
    layer: LayerMask,
    mask: LayerMask,
    tags: Tags,
    passive: bool,
}

impl Collider {
    /// A collider on layer 0 that accepts every layer, untagged and active.
    pub fn new(shape: Shape) -> Collider {
        Collider {
            shape,
            layer: LayerMask::FIRST,
            mask: LayerMask::ALL,
            tags: Tags::new(),
            passive: false,
        }
    }

    pub fn with_layer(mut self, layer: LayerMask) -> Collider {
        self.layer = layer;
        self
    }
    pub fn with_mask(mut self, mask: LayerMask) -> Collider {
        self.mask = mask;
        self
    }
    pub fn with_tag(mut self, tag: impl Into<String>) -> Collider {
        self.tags.insert(tag);
        self
    }
    /// Replaces the tag set.
    pub fn with_tags(mut self, tags: Tags) -> Collider {
        self.tags = tags;
        self
    }
    pub fn passive(mut self) -> Collider {
        self.passive = true;
        self
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
    #[inline]
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }
    #[inline]
    pub fn layer(&self) -> LayerMask {
        self.layer
    }
    #[inline]
    pub fn mask(&self) -> LayerMask {
        self.mask
    }
    #[inline]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }
    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }
    #[inline]
    pub fn is_passive(&self) -> bool {
        self.passive
    }

    /// Moves the shape to `position`. See [`Support::adjust`].
    #[inline]
    pub fn adjust(&mut self, position: Vec2) {
        self.shape.adjust(position);
    }

    /// Whether the filters allow testing this pair: tags must match, then either side's mask
    /// must select the other's layer.
    pub fn can_collide_with(&self, other: &Collider) -> bool {
        self.tags.matches(&other.tags) && layers_match(self.layer, self.mask, other.layer, other.mask)
    }

    /// Tests the shapes for overlap, ignoring the filters.
    ///
    /// Returns `None` when the bounding spheres or the shapes are apart. Otherwise the result
    /// carries the penetration vector, unless EPA ran out of iterations.
    pub fn detect_collision<'a>(
        &'a self,
        other: &'a Collider,
        config: &CollisionConfig,
    ) -> Option<CollisionInformation<'a>> {
        self.detect(other, None, config)
    }

    /// As [`Collider::detect_collision`], starting GJK's search along `hint`, e.g. the relative
    /// velocity or last tick's normal. A zero hint falls back to the centroid direction.
    pub fn detect_collision_with_hint<'a>(
        &'a self,
        other: &'a Collider,
        hint: Vec2,
        config: &CollisionConfig,
    ) -> Option<CollisionInformation<'a>> {
        self.detect(other, Some(hint), config)
    }

    /// [`Collider::can_collide_with`], then [`Collider::detect_collision`].
    pub fn collide<'a>(&'a self, other: &'a Collider, config: &CollisionConfig) -> Option<CollisionInformation<'a>> {
        if !self.can_collide_with(other) {
            return None;
        }
        self.detect_collision(other, config)
    }

    fn detect<'a>(
        &'a self,
        other: &'a Collider,
        hint: Option<Vec2>,
        config: &CollisionConfig,
    ) -> Option<CollisionInformation<'a>> {
        let (a, b) = (&self.shape, &other.shape);
        if !a.bounding_sphere().intersects(&b.bounding_sphere()) {
            return None;
        }

        let outcome = gjk(a, b, hint, config);
        let simplex = outcome.simplex()?;
        let mut info = CollisionInformation::new(a, b, hint);
        info.resolve(epa(a, b, simplex, config));
        Some(info)
    }
}

/// The result of a positive collision test between shapes `a` and `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionInformation<'a> {
    pub shape_a: &'a Shape,
    pub shape_b: &'a Shape,
    /// The GJK search hint the test was run with, if any.
    pub direction_hint: Option<Vec2>,
    /// Translation of `shape_a` that separates it from `shape_b`. `None` when EPA did not
    /// converge, zero when the shapes only touch.
    pub penetration: Option<Vec2>,
    /// Midpoint of `diagonal`.
    pub collision_point: Option<Vec2>,
    /// From `shape_b`'s deepest point inside `shape_a` to `shape_a`'s deepest point inside
    /// `shape_b`. Unknown for touching shapes.
    pub diagonal: Option<[Vec2; 2]>,
}

impl<'a> CollisionInformation<'a> {
    fn new(shape_a: &'a Shape, shape_b: &'a Shape, direction_hint: Option<Vec2>) -> CollisionInformation<'a> {
        CollisionInformation {
            shape_a,
            shape_b,
            direction_hint,
            penetration: None,
            collision_point: None,
            diagonal: None,
        }
    }

    fn resolve(&mut self, penetration: Option<Vec2>) {
        self.penetration = penetration;
        let normal = match penetration {
            Some(p) if p != Vec2::ZERO => -p,
            _ => return,
        };
        let diagonal = [self.shape_b.support_point(-normal), self.shape_a.support_point(normal)];
        self.collision_point = Some((diagonal[0] + diagonal[1]) * 0.5);
        self.diagonal = Some(diagonal);
    }

    /// Length of the penetration vector, zero if unknown.
    pub fn depth(&self) -> Fp {
        self.penetration.map_or(0.0, Vec2::length)
    }

    /// Unit vector from `shape_a` into `shape_b`, if a non-zero penetration is known.
    pub fn normal(&self) -> Option<Vec2> {
        self.penetration.filter(|p| *p != Vec2::ZERO).map(|p| (-p).normalize())
    }

    /// Whether EPA produced a penetration vector.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.penetration.is_some()
    }
}
