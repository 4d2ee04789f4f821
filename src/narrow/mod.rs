//! Narrowphase data and logic module.
//!
//! Both algorithms work on the Minkowski difference `A - B`, sampled through
//! [`support_diff`]: the shapes overlap iff it contains the origin, and the origin's distance
//! to its boundary is the penetration depth.

mod epa;

pub use epa::epa;

use crate::{config::CollisionConfig, shape::Support, Fp, Vec2};

/// A triangle in Minkowski difference space enclosing the origin, as found by [`gjk`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simplex {
    points: [Vec2; 3],
}
impl Simplex {
    #[inline]
    pub fn points(&self) -> [Vec2; 3] {
        self.points
    }

    /// Whether the origin is inside or on the triangle.
    pub fn contains_origin(&self) -> bool {
        let sides = self.sides();
        let has_neg = sides.iter().any(|&s| s < 0.0);
        let has_pos = sides.iter().any(|&s| s > 0.0);
        !(has_neg && has_pos)
    }

    /// Side of the origin against each edge `i -> i + 1`, positive on the left, zero on it.
    /// The sum is twice the signed area.
    fn sides(&self) -> [Fp; 3] {
        let [a, b, c] = self.points;
        [(b - a).perp_dot(-a), (c - b).perp_dot(-b), (a - c).perp_dot(-c)]
    }

    /// The first edge with the origin strictly outside it, as its start index and outward
    /// normal. `None` if the origin is contained or the triangle has no area.
    fn separating_edge(&self) -> Option<(usize, Vec2)> {
        let sides = self.sides();
        let winding: Fp = sides.iter().sum();
        let i = sides.iter().position(|&s| (winding > 0.0 && s < 0.0) || (winding < 0.0 && s > 0.0))?;
        let edge = self.points[(i + 1) % 3] - self.points[i];
        // inside is to the left of counter-clockwise edges
        let normal = if winding > 0.0 { -edge.perp() } else { edge.perp() };
        Some((i, normal))
    }
}

/// Progress of a GJK search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GjkState {
    SearchingFirst,
    SearchingSecond,
    SearchingThird,
    Confirmed,
    Rejected,
    IterationExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GjkOutcome {
    /// The shapes overlap (or touch); the simplex encloses the origin.
    Intersecting(Simplex),
    /// A separating direction was found.
    Separated,
    /// The iteration cap ran out. Treated as no intersection, but not proven.
    Exhausted,
}
impl GjkOutcome {
    #[inline]
    pub fn is_intersecting(&self) -> bool {
        matches!(self, GjkOutcome::Intersecting(_))
    }
    #[inline]
    pub fn simplex(&self) -> Option<&Simplex> {
        match self {
            GjkOutcome::Intersecting(s) => Some(s),
            _ => None,
        }
    }
    /// The terminal search state this outcome corresponds to.
    pub fn state(&self) -> GjkState {
        match self {
            GjkOutcome::Intersecting(_) => GjkState::Confirmed,
            GjkOutcome::Separated => GjkState::Rejected,
            GjkOutcome::Exhausted => GjkState::IterationExhausted,
        }
    }
}

/// Support point of the Minkowski difference `a - b` along `dir`.
#[inline]
pub fn support_diff<A: Support + ?Sized, B: Support + ?Sized>(a: &A, b: &B, dir: Vec2) -> Vec2 {
    a.support_point(dir) - b.support_point(-dir)
}

#[inline]
fn or_axis(dir: Vec2) -> Vec2 {
    if dir == Vec2::ZERO {
        Vec2::X
    } else {
        dir
    }
}
#[inline]
fn perp_toward(edge: Vec2, to: Vec2) -> Vec2 {
    //! Returns the perpendicular of `edge` on the side of `to`, or either one if `to` is parallel.
    let p = edge.perp();
    if p.dot(to) >= 0.0 {
        p
    } else {
        -p
    }
}
#[inline]
fn perp_away(edge: Vec2, from: Vec2) -> Vec2 {
    //! Returns the perpendicular of `edge` on the side opposite to `from`.
    let p = edge.perp();
    if p.dot(from) < 0.0 {
        p
    } else {
        -p
    }
}

/// Runs GJK on `a` and `b`. The first search direction is `hint` if given and non-zero,
/// otherwise from `a`'s centroid toward `b`'s.
pub fn gjk<A: Support + ?Sized, B: Support + ?Sized>(
    a: &A,
    b: &B,
    hint: Option<Vec2>,
    config: &CollisionConfig,
) -> GjkOutcome {
    let cap = config.gjk_iterations(a.vertex_count(), b.vertex_count());
    let initial = or_axis(hint.filter(|h| *h != Vec2::ZERO).unwrap_or_else(|| b.centroid() - a.centroid()));

    // simplex points, oldest first; only the first `len` are live
    let mut simplex = [support_diff(a, b, initial), Vec2::ZERO, Vec2::ZERO];
    if simplex[0] == Vec2::ZERO {
        return touching();
    }
    let mut len = 1;
    let mut dir = or_axis(-simplex[0]);
    let mut state = GjkState::SearchingSecond;

    for iteration in 0..cap {
        let c = support_diff(a, b, dir);
        if c.dot(dir) < 0.0 {
            log::trace!("gjk: separated after {} iterations ({:?})", iteration + 1, state);
            return GjkOutcome::Separated;
        }
        if c == Vec2::ZERO {
            return touching();
        }
        let co = -c;

        if len == 1 {
            let cb = simplex[0] - c;
            if cb.dot(co) > 0.0 {
                // origin lies beside the segment, keep both
                simplex[1] = c;
                len = 2;
                dir = perp_toward(cb, co);
                if dir == Vec2::ZERO {
                    dir = cb.perp();
                }
                state = GjkState::SearchingThird;
            } else {
                simplex[0] = c;
                dir = or_axis(co);
                state = GjkState::SearchingSecond;
            }
            continue;
        }

        let (pa, pb) = (simplex[0], simplex[1]);
        if c == pa || c == pb {
            // nothing lies beyond the segment, which passes through the origin
            return touching();
        }
        let ca = pa - c;
        let cb = pb - c;
        let ca_out = perp_away(ca, cb);
        let cb_out = perp_away(cb, ca);

        if ca_out.dot(co) > 0.0 {
            // origin is outside edge CA
            if ca.dot(co) > 0.0 {
                simplex = [pa, c, Vec2::ZERO];
                dir = ca_out;
                state = GjkState::SearchingThird;
            } else {
                simplex = [c, Vec2::ZERO, Vec2::ZERO];
                len = 1;
                dir = or_axis(co);
                state = GjkState::SearchingSecond;
            }
        } else if cb_out.dot(co) > 0.0 {
            // origin is outside edge CB
            if cb.dot(co) > 0.0 {
                simplex = [pb, c, Vec2::ZERO];
                dir = cb_out;
                state = GjkState::SearchingThird;
            } else {
                simplex = [c, Vec2::ZERO, Vec2::ZERO];
                len = 1;
                dir = or_axis(co);
                state = GjkState::SearchingSecond;
            }
        } else {
            // The origin may still sit on the far side of AB by a rounding error, e.g. when it
            // lay on the segment and either perpendicular was taken. Confirm only what
            // `contains_origin` agrees with, else keep searching beyond the offending edge.
            let triangle = Simplex { points: [pa, pb, c] };
            if triangle.contains_origin() {
                log::trace!("gjk: confirmed after {} iterations", iteration + 1);
                return GjkOutcome::Intersecting(triangle);
            }
            match triangle.separating_edge() {
                Some((i, normal)) => {
                    simplex = [triangle.points[i], triangle.points[(i + 1) % 3], Vec2::ZERO];
                    dir = normal;
                    state = GjkState::SearchingThird;
                }
                // collinear, with the origin on the line
                None => return touching(),
            }
        }
    }

    log::debug!("gjk: exhausted {} iterations while {:?}, reporting no intersection", cap, state);
    GjkOutcome::Exhausted
}

/// A support point hit the origin exactly, so the origin lies on the boundary of the Minkowski
/// difference. The collapsed simplex tells EPA the penetration is zero.
fn touching() -> GjkOutcome {
    log::trace!("gjk: support point on the origin, shapes touch");
    GjkOutcome::Intersecting(Simplex { points: [Vec2::ZERO; 3] })
}

/// Whether `a` and `b` overlap, by GJK alone.
#[inline]
pub fn intersects<A: Support + ?Sized, B: Support + ?Sized>(a: &A, b: &B, config: &CollisionConfig) -> bool {
    gjk(a, b, None, config).is_intersecting()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        init_test_logger,
        shape::{Circle, Line, Point, Polygon, Rectangle, Shape, Triangle},
        Fp,
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn at(mut shape: Shape, x: Fp, y: Fp) -> Shape {
        shape.adjust(Vec2::new(x, y));
        shape
    }
    fn circle(x: Fp, y: Fp, rad: Fp) -> Shape {
        at(Circle::new(Vec2::ZERO, rad).unwrap().into(), x, y)
    }
    fn rect(x: Fp, y: Fp, w: Fp, h: Fp) -> Shape {
        at(Rectangle::new(w, h).unwrap().into(), x, y)
    }

    #[test]
    fn overlapping_circles() {
        init_test_logger();
        let cfg = CollisionConfig::default();
        let (a, b) = (circle(0.0, 0.0, 5.0), circle(6.0, 0.0, 3.0));
        let outcome = gjk(&a, &b, None, &cfg);
        assert_eq!(outcome.state(), GjkState::Confirmed);
        assert!(outcome.simplex().unwrap().contains_origin());
    }

    #[test]
    fn distant_circles() {
        let cfg = CollisionConfig::default();
        let outcome = gjk(&circle(0.0, 0.0, 1.0), &circle(10.0, 0.0, 1.0), None, &cfg);
        assert_eq!(outcome, GjkOutcome::Separated);
        assert_eq!(outcome.state(), GjkState::Rejected);
    }

    #[test]
    fn circles_match_analytic_test() {
        init_test_logger();
        let cfg = CollisionConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..2000 {
            let (x1, y1, r1) = (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(0.1..6.0));
            let (x2, y2, r2) = (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(0.1..6.0));
            let (a, b) = (circle(x1, y1, r1), circle(x2, y2, r2));

            let dist = Vec2::new(x1, y1).distance(Vec2::new(x2, y2));
            if (dist - (r1 + r2)).abs() < 1e-3 {
                continue; // too close to call in floating point
            }
            let expected = dist <= r1 + r2;
            assert_eq!(intersects(&a, &b, &cfg), expected, "{:?} vs {:?}", a, b);
            assert_eq!(intersects(&b, &a, &cfg), expected, "{:?} vs {:?}", b, a);
        }
    }

    #[test]
    fn overlapping_circles_are_enclosed() {
        init_test_logger();
        let cfg = CollisionConfig::default();
        // the origin lies on the first segment, so the third point may land on either side
        let (a, b) = (circle(0.054, -1.647, 1.953), circle(1.363, -1.202, 1.2));
        assert!(gjk(&a, &b, None, &cfg).simplex().unwrap().contains_origin());

        let mut rng = StdRng::seed_from_u64(2707);
        let mut tested = 0;
        while tested < 5000 {
            let (x1, y1, r1) = (rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0), rng.gen_range(0.5..3.0));
            let (x2, y2, r2) = (rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0), rng.gen_range(0.5..3.0));
            if Vec2::new(x1, y1).distance(Vec2::new(x2, y2)) >= r1 + r2 - 0.05 {
                continue;
            }
            tested += 1;

            let (a, b) = (circle(x1, y1, r1), circle(x2, y2, r2));
            for outcome in &[gjk(&a, &b, None, &cfg), gjk(&b, &a, None, &cfg)] {
                let simplex = outcome.simplex().unwrap_or_else(|| panic!("{:?} vs {:?}: {:?}", a, b, outcome));
                assert!(simplex.contains_origin(), "{:?} vs {:?}: {:?}", a, b, simplex);
            }
        }
    }

    #[test]
    fn separating_edge_faces_the_origin() {
        // counter-clockwise, origin below the bottom edge
        let s = Simplex { points: [Vec2::new(-1.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 3.0)] };
        assert!(!s.contains_origin());
        let (i, normal) = s.separating_edge().unwrap();
        assert_eq!(i, 0);
        assert!(normal.dot(Vec2::new(0.0, -1.0)) > 0.0 && normal.x == 0.0);

        // clockwise, same triangle
        let s = Simplex { points: [Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0), Vec2::new(0.0, 3.0)] };
        let (i, normal) = s.separating_edge().unwrap();
        assert_eq!(i, 0);
        assert!(normal.y < 0.0 && normal.x == 0.0);

        let s = Simplex { points: [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(0.0, 3.0)] };
        assert!(s.contains_origin());
        assert_eq!(s.separating_edge(), None);
    }

    #[test]
    fn symmetric_over_mixed_shapes() {
        let cfg = CollisionConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let shapes = |rng: &mut StdRng| -> Shape {
            let (x, y) = (rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));
            let shape: Shape = match rng.gen_range(0..6) {
                0 => Point::new(Vec2::ZERO).unwrap().into(),
                1 => Line::new(Vec2::new(-1.0, -0.5), Vec2::new(1.5, 0.5)).unwrap().into(),
                2 => Circle::new(Vec2::ZERO, rng.gen_range(0.2..2.0)).unwrap().into(),
                3 => Triangle::new(Vec2::new(-1.0, -1.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 1.5)).unwrap().into(),
                4 => Rectangle::new(rng.gen_range(0.5..3.0), rng.gen_range(0.5..3.0)).unwrap().into(),
                _ => Polygon::new(&[
                    Vec2::new(0.0, 1.0),
                    Vec2::new(0.9, 0.3),
                    Vec2::new(0.6, -0.8),
                    Vec2::new(-0.6, -0.8),
                    Vec2::new(-0.9, 0.3),
                ])
                .unwrap()
                .into(),
            };
            at(shape, x, y)
        };

        for _ in 0..2000 {
            let a = shapes(&mut rng);
            let b = shapes(&mut rng);
            assert_eq!(intersects(&a, &b, &cfg), intersects(&b, &a, &cfg), "{:?} vs {:?}", a, b);
            if let Some(simplex) = gjk(&a, &b, None, &cfg).simplex() {
                assert!(simplex.contains_origin());
            }
        }
    }

    #[test]
    fn rectangles_and_polygons() {
        let cfg = CollisionConfig::default();
        assert!(intersects(&rect(0.0, 0.0, 10.0, 10.0), &rect(7.0, 2.0, 10.0, 10.0), &cfg));
        assert!(!intersects(&rect(0.0, 0.0, 10.0, 10.0), &rect(10.5, 0.0, 1.0, 1.0), &cfg));
        // touching edges count as intersecting
        assert!(intersects(&rect(0.0, 0.0, 2.0, 2.0), &rect(2.0, 0.0, 2.0, 2.0), &cfg));

        let diamond: Shape =
            Polygon::new(&[Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, -1.0)])
                .unwrap()
                .into();
        // the square's corner is inside the diamond's bounding box, but not the diamond
        assert!(!intersects(&diamond, &rect(1.1, 1.1, 1.0, 1.0), &cfg));
        assert!(intersects(&diamond, &rect(0.9, 0.9, 1.0, 1.0), &cfg));
    }

    #[test]
    fn points_and_lines() {
        let cfg = CollisionConfig::default();
        let p = at(Point::new(Vec2::ZERO).unwrap().into(), 1.0, 1.0);
        assert!(intersects(&p, &rect(0.0, 0.0, 4.0, 4.0), &cfg));
        assert!(!intersects(&p, &rect(5.0, 0.0, 4.0, 4.0), &cfg));
        assert!(intersects(&p, &p.clone(), &cfg));
        assert!(!intersects(&p, &at(Point::new(Vec2::ZERO).unwrap().into(), 1.0, 2.0), &cfg));

        let l = at(Line::new(Vec2::new(-3.0, -3.0), Vec2::new(3.0, 3.0)).unwrap().into(), 0.0, 0.0);
        assert!(intersects(&l, &circle(0.0, 0.0, 0.5), &cfg));
        assert!(intersects(&l, &circle(3.0, 0.0, 2.5), &cfg));
        assert!(!intersects(&l, &circle(3.0, 0.0, 2.0), &cfg));
    }

    #[test]
    fn hint_does_not_change_the_answer() {
        let cfg = CollisionConfig::default();
        let (a, b) = (rect(0.0, 0.0, 2.0, 2.0), circle(1.5, 1.5, 1.0));
        for &h in &[Vec2::X, -Vec2::Y, Vec2::new(3.0, -7.0), Vec2::ZERO] {
            assert!(gjk(&a, &b, Some(h), &cfg).is_intersecting());
        }
    }

    #[test]
    fn zero_cap_is_exhausted() {
        let cfg = CollisionConfig::default().with_gjk_curved_margin(0);
        let outcome = gjk(&circle(0.0, 0.0, 5.0), &circle(6.0, 0.0, 3.0), None, &cfg);
        assert_eq!(outcome, GjkOutcome::Exhausted);
        assert_eq!(outcome.state(), GjkState::IterationExhausted);
    }
}
