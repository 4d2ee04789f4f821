use super::hull::Hull;
use crate::{error::ShapeError, Fp, Vec2};

/// A convex polygon of any vertex count, vertices stored counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(super) hull: Hull<Vec<Vec2>>,
}

impl Polygon {
    /// `verts` may be in any order, but must be the corners of a strictly convex polygon:
    /// no duplicates, no vertex inside the hull or on another edge.
    pub fn new(verts: &[Vec2]) -> Result<Polygon, ShapeError> {
        let len = verts.len();
        if len == 0 {
            return Err(ShapeError::NoVertices);
        }
        if verts.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite);
        }
        if len < 3 {
            return Err(ShapeError::TooFewVertices(len));
        }
        for i in 1..len {
            if verts[..i].contains(&verts[i]) {
                return Err(ShapeError::DuplicateVertex(i));
            }
        }
        let a = verts[0];
        let ab = verts[1] - a;
        if verts[2..].iter().all(|&v| ab.perp_dot(v - a) == 0.0) {
            return Err(ShapeError::CollinearPolygon);
        }

        let order = wind(verts);
        for i in 0..len {
            let prev = verts[order[(i + len - 1) % len]];
            let curr = verts[order[i]];
            let next = verts[order[(i + 1) % len]];
            if (curr - prev).perp_dot(next - curr) <= 0.0 {
                return Err(ShapeError::NotConvex(order[i]));
            }
        }

        let wound = order.into_iter().map(|i| verts[i]).collect::<Vec<_>>();
        Ok(Polygon { hull: Hull::new(wound)? })
    }

    /// Builds a polygon from parallel coordinate arrays.
    pub fn from_coords(xs: &[Fp], ys: &[Fp]) -> Result<Polygon, ShapeError> {
        if xs.len() != ys.len() {
            return Err(ShapeError::MismatchedCoordinates { xs: xs.len(), ys: ys.len() });
        }
        let verts = xs.iter().zip(ys).map(|(&x, &y)| Vec2::new(x, y)).collect::<Vec<_>>();
        Polygon::new(&verts)
    }
}

/// Orders vertex indices counter-clockwise by angle about the vertex mean.
fn wind(verts: &[Vec2]) -> Vec<usize> {
    let mean = verts.iter().fold(Vec2::ZERO, |acc, &v| acc + v) / verts.len() as Fp;
    let angle = |i: usize| {
        let d = verts[i] - mean;
        d.y.atan2(d.x)
    };

    let mut order = (0..verts.len()).collect::<Vec<_>>();
    order.sort_by(|&i, &j| angle(i).partial_cmp(&angle(j)).unwrap_or(std::cmp::Ordering::Equal));
    order
}
