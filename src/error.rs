//! Construction-time errors.
//!
//! Runtime geometric ambiguity (a GJK or EPA iteration cap running out) is reported through
//! `Option`/`GjkOutcome` values instead, see [`crate::narrow`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("polygon has no vertices")]
    NoVertices,
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("coordinate arrays differ in length: {xs} x values, {ys} y values")]
    MismatchedCoordinates { xs: usize, ys: usize },
    #[error("non-finite coordinate in shape geometry")]
    NonFinite,
    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("rectangle extents must be positive, got {width} x {height}")]
    InvalidExtents { width: f64, height: f64 },
    #[error("line endpoints coincide")]
    DegenerateLine,
    #[error("triangle vertices are collinear")]
    DegenerateTriangle,
    #[error("polygon vertex {0} is duplicated")]
    DuplicateVertex(usize),
    #[error("polygon vertices are collinear")]
    CollinearPolygon,
    #[error("polygon vertex {0} lies inside the hull, the polygon is not convex")]
    NotConvex(usize),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    #[error("layer index {0} is out of range, layers are 0..=14")]
    LayerOutOfRange(u8),
    #[error("bit 15 of a layer mask is reserved, got {0:#06x}")]
    ReservedBit(u16),
}
