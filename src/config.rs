//! Tunable narrowphase constants.

use crate::Fp;
use serde::{Deserialize, Serialize};

/// Iteration caps and tolerances for GJK and EPA.
///
/// The caps are heuristics, not proven bounds: GJK runs for at most the sum of both shapes'
/// vertex counts, EPA for that sum plus one. Curved shapes (circles) count no vertices and
/// instead add a fixed margin, since their support function never runs out of new points.
/// Running out of iterations is reported as "no intersection" / "no penetration vector".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Extra GJK iterations when either shape is curved.
    pub gjk_curved_margin: usize,
    /// Extra EPA iterations when either shape is curved.
    pub epa_curved_margin: usize,
    /// EPA stops once a new support point lies within this of the closest edge, compared in
    /// squared-distance units.
    pub epa_tolerance: Fp,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            gjk_curved_margin: 20,
            epa_curved_margin: 64,
            epa_tolerance: 0.001,
        }
    }
}

impl CollisionConfig {
    pub fn with_gjk_curved_margin(mut self, margin: usize) -> Self {
        self.gjk_curved_margin = margin;
        self
    }
    pub fn with_epa_curved_margin(mut self, margin: usize) -> Self {
        self.epa_curved_margin = margin;
        self
    }
    pub fn with_epa_tolerance(mut self, tolerance: Fp) -> Self {
        self.epa_tolerance = tolerance;
        self
    }

    /// GJK iteration cap for a pair with the given vertex counts, `None` being curved.
    pub fn gjk_iterations(&self, a: Option<usize>, b: Option<usize>) -> usize {
        let base = a.unwrap_or(0) + b.unwrap_or(0);
        if a.is_none() || b.is_none() {
            base + self.gjk_curved_margin
        } else {
            base
        }
    }

    /// EPA iteration cap for a pair with the given vertex counts, `None` being curved.
    pub fn epa_iterations(&self, a: Option<usize>, b: Option<usize>) -> usize {
        let base = a.unwrap_or(0) + b.unwrap_or(0) + 1;
        if a.is_none() || b.is_none() {
            base + self.epa_curved_margin
        } else {
            base
        }
    }
}
