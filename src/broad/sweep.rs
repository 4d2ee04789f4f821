use crate::{collider::Collider, shape::Support, Fp};
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use std::cmp::Ordering;

/// Finds every pair of colliders whose bounding spheres overlap and whose filters allow a test,
/// using a [sweep and prune](https://en.wikipedia.org/wiki/Sweep_and_prune) over the x axis.
///
/// Pairs are returned as `(initiator, target)` indices into `colliders`, sorted. A passive
/// collider is only ever a target, so a pair of passive colliders is never returned.
/// Shapes must already be adjusted for this tick.
pub fn sweep_pairs(colliders: &[Collider]) -> Vec<(usize, usize)> {
    let mut bounds: Vec<(Fp, bool, usize)> = Vec::with_capacity(colliders.len() * 2);
    for (i, c) in colliders.iter().enumerate() {
        let (min, max) = c.shape().bounding_sphere().x_extent();
        bounds.push((min, false, i));
        bounds.push((max, true, i));
    }
    // begins sort before ends at equal values, touching spheres count as overlapping
    bounds.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)));

    let mut active = IndexSet::<usize, FnvBuildHasher>::with_hasher(FnvBuildHasher::default());
    let mut pairs = Vec::new();
    for &(_, end, i) in bounds.iter() {
        if !end {
            active.insert(i);
            continue;
        }

        active.swap_remove(&i);
        let s1 = colliders[i].shape().bounding_sphere();
        let (min1, max1) = s1.y_extent();
        for &j in active.iter() {
            let s2 = colliders[j].shape().bounding_sphere();
            let (min2, max2) = s2.y_extent();
            if min1 <= max2 && max1 >= min2 && s1.intersects(&s2) {
                if let Some(pair) = orient(colliders, i, j) {
                    pairs.push(pair);
                }
            }
        }
    }

    pairs.sort_unstable();
    log::trace!("sweep: {} candidate pairs among {} colliders", pairs.len(), colliders.len());
    pairs
}

/// Picks the initiator of a pair and applies the collision filter.
fn orient(colliders: &[Collider], i: usize, j: usize) -> Option<(usize, usize)> {
    let (a, b) = (&colliders[i], &colliders[j]);
    let (initiator, target) = match (a.is_passive(), b.is_passive()) {
        (true, true) => return None,
        (true, false) => (j, i),
        (false, true) => (i, j),
        (false, false) => (i.min(j), i.max(j)),
    };
    if colliders[initiator].can_collide_with(&colliders[target]) {
        Some((initiator, target))
    } else {
        None
    }
}
