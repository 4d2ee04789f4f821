//! Convex collision detection in 2D.
//!
//! Shapes expose a support function; the narrowphase runs GJK over the Minkowski difference
//! of two shapes and EPA over the resulting simplex to recover a penetration vector. Bounding
//! spheres prune pairs beforehand, and colliders carry layer/mask/tag rules deciding which
//! pairs are tested at all.
//!
//! Geometry is updated in two phases each tick: every shape is `adjust`ed to its new position
//! first, then queries run. Queries never mutate shapes.

pub mod broad;
pub mod collider;
pub mod config;
pub mod error;
pub mod filter;
pub mod narrow;
pub mod shape;

pub use broad::BoundingSphere;
pub use collider::{Collider, CollisionInformation};
pub use config::CollisionConfig;
pub use error::{FilterError, ShapeError};
pub use filter::{LayerMask, Tags};
pub use narrow::{epa, gjk, intersects, GjkOutcome, Simplex};
pub use shape::{Circle, Line, Point, Polygon, Rectangle, Shape, Support, Triangle};

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
