use super::{support_diff, Simplex};
use crate::{config::CollisionConfig, shape::Support, Fp, Vec2};

/// Expands a GJK simplex toward the boundary of the Minkowski difference `a - b` and returns the
/// penetration vector: the smallest translation of `a` separating it from `b`.
///
/// Returns `None` if the iteration cap runs out first; the shapes still overlap, but no
/// resolution is known. A collapsed (zero-area) simplex means the shapes touch, and yields zero.
pub fn epa<A: Support + ?Sized, B: Support + ?Sized>(
    a: &A,
    b: &B,
    simplex: &Simplex,
    config: &CollisionConfig,
) -> Option<Vec2> {
    let mut poly = simplex.points().to_vec();
    let area = signed_area(&poly);
    if area == 0.0 {
        return Some(Vec2::ZERO);
    } else if area < 0.0 {
        poly.reverse();
    }

    let cap = config.epa_iterations(a.vertex_count(), b.vertex_count());
    for iteration in 0..cap {
        let (index, normal, dist2) = closest_edge(&poly);

        if dist2 < config.epa_tolerance {
            // the origin is (nearly) on this edge, so `normal` has no reliable direction
            let edge = poly[(index + 1) % poly.len()] - poly[index];
            let out = Vec2::new(edge.y, -edge.x).normalize();
            let dist = out.dot(poly[index]);
            let candidate = support_diff(a, b, out);
            if out.dot(candidate) - dist <= config.epa_tolerance {
                log::trace!("epa: converged on a touching edge after {} iterations", iteration + 1);
                return Some(-out * dist);
            }
            poly.insert(index + 1, candidate);
            continue;
        }

        let candidate = support_diff(a, b, normal);
        if approx::abs_diff_eq!(normal.dot(candidate), dist2, epsilon = config.epa_tolerance) {
            log::trace!("epa: converged after {} iterations, depth^2 {}", iteration + 1, dist2);
            return Some(-normal);
        }
        poly.insert(index + 1, candidate);
    }

    log::debug!("epa: no convergence within {} iterations ({} vertices)", cap, poly.len());
    None
}

/// Twice the signed area of `poly`, positive when counter-clockwise.
fn signed_area(poly: &[Vec2]) -> Fp {
    let len = poly.len();
    (0..len).map(|i| poly[i].perp_dot(poly[(i + 1) % len])).sum()
}

/// Finds the edge whose supporting line is closest to the origin.
///
/// Returns the edge's start index, the vector from the origin to the closest point on the line,
/// and its squared length.
fn closest_edge(poly: &[Vec2]) -> (usize, Vec2, Fp) {
    let len = poly.len();
    let mut best = (0, Vec2::ZERO, Fp::INFINITY);
    for i in 0..len {
        let p = poly[i];
        let edge = poly[(i + 1) % len] - p;
        let ee = edge.length_squared();
        // foot of the perpendicular: p + t * edge, with (p + t * edge) . edge = 0
        let closest = if ee == 0.0 { p } else { p - edge * (p.dot(edge) / ee) };
        let dist2 = closest.length_squared();
        if dist2 < best.2 {
            best = (i, closest, dist2);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        init_test_logger,
        narrow::gjk,
        shape::{Circle, Polygon, Rectangle, Shape, Triangle},
    };
    use approx::assert_abs_diff_eq;

    fn at(mut shape: Shape, x: Fp, y: Fp) -> Shape {
        shape.adjust(Vec2::new(x, y));
        shape
    }
    fn penetration(a: &Shape, b: &Shape) -> Option<Vec2> {
        let cfg = CollisionConfig::default();
        let simplex = *gjk(a, b, None, &cfg).simplex().expect("shapes should intersect");
        epa(a, b, &simplex, &cfg)
    }

    #[test]
    fn circles_separate_along_center_line() {
        init_test_logger();
        let a = at(Circle::new(Vec2::ZERO, 5.0).unwrap().into(), 0.0, 0.0);
        let b = at(Circle::new(Vec2::ZERO, 3.0).unwrap().into(), 6.0, 0.0);

        let v = penetration(&a, &b).unwrap();
        assert_abs_diff_eq!(v.length(), 2.0, epsilon = 0.01);
        assert!(v.x < 0.0);
        assert!(v.y.abs() < 0.05);

        // and the other way around
        let v = penetration(&b, &a).unwrap();
        assert_abs_diff_eq!(v.length(), 2.0, epsilon = 0.01);
        assert!(v.x > 0.0);
    }

    #[test]
    fn rectangles_overlapping_by_three() {
        init_test_logger();
        let a = at(Rectangle::new(10.0, 10.0).unwrap().into(), 0.0, 0.0);
        let b = at(Rectangle::new(10.0, 10.0).unwrap().into(), 7.0, 2.0);

        let v = penetration(&a, &b).unwrap();
        assert_abs_diff_eq!(v.x, -3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-4);

        let b = at(Rectangle::new(10.0, 10.0).unwrap().into(), -1.0, -7.0);
        let v = penetration(&a, &b).unwrap();
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v.y, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn shallow_overlap_below_tolerance() {
        init_test_logger();
        // every closest edge passes within the tolerance of the origin, so the search runs
        // along outward edge normals
        let a = at(Rectangle::new(10.0, 10.0).unwrap().into(), 0.0, 0.0);
        let b = at(Rectangle::new(10.0, 10.0).unwrap().into(), 9.99, 0.0);
        let v = penetration(&a, &b).unwrap();
        assert_abs_diff_eq!(v.x, -0.01, epsilon = 1e-4);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn triangle_into_polygon() {
        let square: Shape = Polygon::from_coords(&[0.0, 4.0, 4.0, 0.0], &[0.0, 0.0, 4.0, 4.0]).unwrap().into();
        // tip pokes 1 unit down through the top edge
        let tri = at(
            Triangle::new(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0), Vec2::new(0.0, 0.0)).unwrap().into(),
            2.0,
            3.0,
        );
        let v = penetration(&tri, &square).unwrap();
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn touching_yields_zero() {
        let a = at(Rectangle::new(2.0, 2.0).unwrap().into(), 0.0, 0.0);
        let b = at(Rectangle::new(2.0, 2.0).unwrap().into(), 2.0, 0.0);
        let v = penetration(&a, &b).unwrap();
        assert_abs_diff_eq!(v.length(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn cap_exhaustion_is_none() {
        let a = at(Circle::new(Vec2::ZERO, 5.0).unwrap().into(), 0.0, 0.0);
        let b = at(Circle::new(Vec2::ZERO, 3.0).unwrap().into(), 6.0, 0.0);
        let cfg = CollisionConfig::default().with_epa_curved_margin(0).with_epa_tolerance(1e-9);
        let simplex = *gjk(&a, &b, None, &cfg).simplex().unwrap();
        assert_eq!(epa(&a, &b, &simplex, &cfg), None);
    }

    #[test]
    fn closest_edge_of_square() {
        let poly = [Vec2::new(-1.0, -2.0), Vec2::new(3.0, -2.0), Vec2::new(3.0, 2.0), Vec2::new(-1.0, 2.0)];
        let (index, normal, dist2) = closest_edge(&poly);
        assert_eq!(index, 3);
        assert_eq!(normal, Vec2::new(-1.0, 0.0));
        assert_eq!(dist2, 1.0);
        assert!(signed_area(&poly) > 0.0);
    }
}
