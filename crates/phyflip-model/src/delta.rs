// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Sparse flip sets.
//!
//! A `FlipDelta` records which cells of the input matrix have tentatively been
//! flipped to 1 along the current search path. It is owned by the search
//! driver and handed to bounding algorithms by shared reference only.
//! Coordinates are unique and insertion order carries no meaning, so equality
//! is set equality.

use crate::index::Coord;
use rustc_hash::FxHashSet;

/// A sparse set of flipped cell coordinates.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FlipDelta {
    flips: FxHashSet<Coord>,
}

impl FlipDelta {
    /// Creates an empty delta.
    #[inline]
    pub fn new() -> Self {
        Self {
            flips: FxHashSet::default(),
        }
    }

    /// Creates an empty delta with room for `capacity` flips.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            flips: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Adds a flip. Returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, coord: Coord) -> bool {
        self.flips.insert(coord)
    }

    /// Removes a flip. Returns `false` if it was not present.
    #[inline]
    pub fn remove(&mut self, coord: Coord) -> bool {
        self.flips.remove(&coord)
    }

    /// Returns `true` if the cell is flipped.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.flips.contains(&coord)
    }

    /// Returns the number of flips.
    #[inline]
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    /// Returns `true` if no cell is flipped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    /// Removes all flips, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.flips.clear();
    }

    /// Iterates over the flips in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.flips.iter().copied()
    }

    /// Returns the flips in row-major order.
    pub fn sorted(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.iter().collect();
        coords.sort_unstable();
        coords
    }

    /// Returns the flips present in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a FlipDelta) -> impl Iterator<Item = Coord> + 'a {
        self.flips.difference(&other.flips).copied()
    }

    /// Returns `true` if every flip of `other` is also in `self`.
    #[inline]
    pub fn is_superset(&self, other: &FlipDelta) -> bool {
        self.flips.is_superset(&other.flips)
    }

    /// Returns a copy of this delta with one more flip.
    pub fn with(&self, coord: Coord) -> FlipDelta {
        let mut next = self.clone();
        next.insert(coord);
        next
    }
}

impl FromIterator<Coord> for FlipDelta {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self {
            flips: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coord> for FlipDelta {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Coord>,
    {
        self.flips.extend(iter);
    }
}

impl std::fmt::Debug for FlipDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.sorted()).finish()
    }
}

impl std::fmt::Display for FlipDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FlipDelta(")?;
        for (i, coord) in self.sorted().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", coord)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut delta = FlipDelta::new();
        assert!(delta.insert(Coord::new(1, 2)));
        assert!(!delta.insert(Coord::new(1, 2)));
        assert_eq!(delta.len(), 1);
        assert!(delta.contains(Coord::new(1, 2)));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: FlipDelta = [Coord::new(0, 1), Coord::new(2, 0)].into_iter().collect();
        let b: FlipDelta = [Coord::new(2, 0), Coord::new(0, 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base: FlipDelta = [Coord::new(0, 0)].into_iter().collect();
        let next = base.with(Coord::new(1, 1));
        assert_eq!(base.len(), 1);
        assert_eq!(next.len(), 2);
        assert!(next.is_superset(&base));
        assert!(!base.is_superset(&next));
    }

    #[test]
    fn test_difference_and_sorted() {
        let a: FlipDelta = [Coord::new(1, 0), Coord::new(0, 3), Coord::new(0, 1)]
            .into_iter()
            .collect();
        let b: FlipDelta = [Coord::new(0, 3)].into_iter().collect();
        let mut diff: Vec<Coord> = a.difference(&b).collect();
        diff.sort_unstable();
        assert_eq!(diff, vec![Coord::new(0, 1), Coord::new(1, 0)]);
        assert_eq!(
            a.sorted(),
            vec![Coord::new(0, 1), Coord::new(0, 3), Coord::new(1, 0)]
        );
    }

    #[test]
    fn test_display_is_sorted() {
        let delta: FlipDelta = [Coord::new(1, 1), Coord::new(0, 2)].into_iter().collect();
        assert_eq!(format!("{}", delta), "FlipDelta((0, 2), (1, 1))");
    }
}
