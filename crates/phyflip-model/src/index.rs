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

//! # Strongly Typed Matrix Indices
//!
//! Phantom-tagged wrappers around `usize` so that row and column indices of a
//! genotype matrix cannot be swapped by accident. `TypedIndex<T>` compiles down
//! to a transparent `usize`; the tag only contributes a `NAME` used by
//! `Display` and `Debug`.
//!
//! ```rust
//! use phyflip_model::index::{ColumnIndex, RowIndex};
//!
//! let row = RowIndex::new(2);
//! let column = ColumnIndex::new(5);
//! assert_eq!(format!("{}", row), "RowIndex(2)");
//! assert_eq!(column.get(), 5);
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<T>) -> Self {
        index.index
    }
}

/// A tag type for row (cell / taxon) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RowIndexTag;

impl TypedIndexTag for RowIndexTag {
    const NAME: &'static str = "RowIndex";
}

/// A typed index for matrix rows.
pub type RowIndex = TypedIndex<RowIndexTag>;

/// A tag type for column (mutation) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ColumnIndexTag;

impl TypedIndexTag for ColumnIndexTag {
    const NAME: &'static str = "ColumnIndex";
}

/// A typed index for matrix columns.
pub type ColumnIndex = TypedIndex<ColumnIndexTag>;

/// The coordinate of a single matrix cell.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Coord {
    pub row: RowIndex,
    pub column: ColumnIndex,
}

impl Coord {
    /// Creates a new coordinate from raw row and column positions.
    #[inline(always)]
    pub const fn new(row: usize, column: usize) -> Self {
        Self {
            row: RowIndex::new(row),
            column: ColumnIndex::new(column),
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row.get(), self.column.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_tag_name() {
        assert_eq!(format!("{}", RowIndex::new(3)), "RowIndex(3)");
        assert_eq!(format!("{:?}", ColumnIndex::new(7)), "ColumnIndex(7)");
    }

    #[test]
    fn test_conversions_round_trip_through_usize() {
        let column: ColumnIndex = 4usize.into();
        let raw: usize = column.into();
        assert_eq!(raw, 4);
    }

    #[test]
    fn test_coord_ordering_is_row_major() {
        let a = Coord::new(0, 5);
        let b = Coord::new(1, 0);
        assert!(a < b);
        assert_eq!(format!("{}", Coord::new(2, 3)), "(2, 3)");
    }
}
