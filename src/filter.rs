//! Layer, mask and tag rules deciding whether two colliders are tested against each other.
//!
//! Layers are 15-bit masks. Layer `n` (`0..=14`) is stored as bit `14 - n`, so layer 0 is the
//! most significant usable bit. Bit 15 is reserved and never set.

use crate::error::FilterError;
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use std::ops::{BitAnd, BitOr};

pub const LAYER_COUNT: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(u16);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(0x7fff);
    /// Layer 0 alone, the layer new colliders are placed on.
    pub const FIRST: LayerMask = LayerMask(1 << (LAYER_COUNT - 1));

    /// The mask holding only layer `n`.
    pub fn encode(n: u8) -> Result<LayerMask, FilterError> {
        if n >= LAYER_COUNT {
            return Err(FilterError::LayerOutOfRange(n));
        }
        Ok(LayerMask(1 << (LAYER_COUNT - 1 - n)))
    }

    pub fn from_layers(layers: &[u8]) -> Result<LayerMask, FilterError> {
        layers
            .iter()
            .try_fold(LayerMask::NONE, |mask, &n| -> Result<LayerMask, FilterError> { Ok(mask | LayerMask::encode(n)?) })
    }

    pub fn from_bits(bits: u16) -> Result<LayerMask, FilterError> {
        if bits & !LayerMask::ALL.0 != 0 {
            return Err(FilterError::ReservedBit(bits));
        }
        Ok(LayerMask(bits))
    }

    #[inline]
    pub fn bits(self) -> u16 {
        self.0
    }

    /// The layer indices set in this mask, ascending.
    pub fn decode(self) -> Vec<u8> {
        (0..LAYER_COUNT).filter(|&n| self.contains(n)).collect()
    }

    #[inline]
    pub fn contains(self, n: u8) -> bool {
        n < LAYER_COUNT && self.0 & (1 << (LAYER_COUNT - 1 - n)) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;
    fn bitor(self, rhs: LayerMask) -> LayerMask {
        self.union(rhs)
    }
}
impl BitAnd for LayerMask {
    type Output = LayerMask;
    fn bitand(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 & rhs.0)
    }
}

/// Whether either side's mask selects the other side's layer.
#[inline]
pub fn layers_match(layer_a: LayerMask, mask_a: LayerMask, layer_b: LayerMask, mask_b: LayerMask) -> bool {
    !(layer_a & mask_b).is_empty() || !(mask_a & layer_b).is_empty()
}

/// An insertion-ordered set of tag strings.
#[derive(Debug, Clone, Default)]
pub struct Tags {
    set: IndexSet<String, FnvBuildHasher>,
}

impl Tags {
    pub fn new() -> Tags {
        Tags::default()
    }

    /// Returns whether the tag was newly added.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.set.insert(tag.into())
    }
    pub fn remove(&mut self, tag: &str) -> bool {
        self.set.shift_remove(tag)
    }
    pub fn contains(&self, tag: &str) -> bool {
        self.set.contains(tag)
    }
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
    pub fn len(&self) -> usize {
        self.set.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.set.iter().map(String::as_str)
    }

    /// Untagged only matches untagged, tagged never matches untagged, and two tagged sets
    /// match when they share a tag.
    pub fn matches(&self, other: &Tags) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => {
                let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
                small.iter().any(|t| large.contains(t))
            }
            _ => false,
        }
    }
}

impl PartialEq for Tags {
    fn eq(&self, other: &Tags) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}
impl Eq for Tags {}

impl<S: Into<String>> std::iter::FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Tags {
        let mut tags = Tags::new();
        for t in iter {
            tags.insert(t);
        }
        tags
    }
}
