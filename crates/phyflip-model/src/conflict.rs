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

//! Conflict detection for perfect phylogeny.
//!
//! A binary matrix admits a perfect phylogeny iff no pair of columns shows all
//! three gametes `(1,0)`, `(0,1)` and `(1,1)`: the row sets of any two columns
//! must be disjoint or nested. This module checks that property for a matrix
//! with a `FlipDelta` applied, treating missing entries as 0.
//!
//! Columns are materialized as `FixedBitSet`s of the rows holding a 1, so one
//! pair test is a handful of word-wise set operations.

use crate::{
    delta::FlipDelta,
    index::{ColumnIndex, RowIndex},
    matrix::{Cell, Matrix},
};
use fixedbitset::FixedBitSet;

/// A violating column pair together with one witness row per gamete.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Conflict {
    /// The left column of the pair (`left < right`).
    pub left: ColumnIndex,
    /// The right column of the pair.
    pub right: ColumnIndex,
    /// A row with 1 in `left` and 0 in `right`.
    pub row_one_zero: RowIndex,
    /// A row with 0 in `left` and 1 in `right`.
    pub row_zero_one: RowIndex,
    /// A row with 1 in both columns.
    pub row_one_one: RowIndex,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Conflict(columns: ({}, {}), rows 10/01/11: {}/{}/{})",
            self.left.get(),
            self.right.get(),
            self.row_one_zero.get(),
            self.row_zero_one.get(),
            self.row_one_one.get()
        )
    }
}

/// Per-column row sets of the current 1-entries.
#[derive(Clone, Debug)]
pub struct ColumnSets {
    columns: Vec<FixedBitSet>,
}

impl ColumnSets {
    /// Builds the column sets of `matrix` with `delta` applied.
    pub fn new(matrix: &Matrix, delta: &FlipDelta) -> Self {
        let num_rows = matrix.num_rows();
        let mut columns = vec![FixedBitSet::with_capacity(num_rows); matrix.num_columns()];

        for r in 0..num_rows {
            let row = RowIndex::new(r);
            for (c, cell) in matrix.row(row).iter().enumerate() {
                if *cell == Cell::One {
                    columns[c].insert(r);
                }
            }
        }
        for coord in delta.iter() {
            if matrix.contains(coord) {
                columns[coord.column.get()].insert(coord.row.get());
            }
        }

        Self { columns }
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the row set of a column.
    #[inline]
    pub fn column(&self, column: ColumnIndex) -> &FixedBitSet {
        &self.columns[column.get()]
    }

    /// Tests one column pair for the three-gamete pattern.
    pub fn conflict_between(&self, left: ColumnIndex, right: ColumnIndex) -> Option<Conflict> {
        let a = &self.columns[left.get()];
        let b = &self.columns[right.get()];

        let row_one_one = a.intersection(b).next()?;
        let row_one_zero = a.difference(b).next()?;
        let row_zero_one = b.difference(a).next()?;

        Some(Conflict {
            left,
            right,
            row_one_zero: RowIndex::new(row_one_zero),
            row_zero_one: RowIndex::new(row_zero_one),
            row_one_one: RowIndex::new(row_one_one),
        })
    }

    /// Returns the first conflicting pair in lexicographic column order.
    pub fn first_conflict(&self) -> Option<Conflict> {
        let n = self.columns.len();
        (0..n).find_map(|p| {
            (p + 1..n).find_map(|q| self.conflict_between(ColumnIndex::new(p), ColumnIndex::new(q)))
        })
    }

    /// Iterates over every conflicting pair in lexicographic column order.
    pub fn conflicts(&self) -> impl Iterator<Item = Conflict> + '_ {
        let n = self.columns.len();
        (0..n).flat_map(move |p| {
            (p + 1..n).filter_map(move |q| {
                self.conflict_between(ColumnIndex::new(p), ColumnIndex::new(q))
            })
        })
    }
}

/// Returns the first conflict of `matrix` with `delta` applied, if any.
#[inline]
pub fn find_conflict(matrix: &Matrix, delta: &FlipDelta) -> Option<Conflict> {
    ColumnSets::new(matrix, delta).first_conflict()
}

/// Returns `true` if `matrix` with `delta` applied admits a perfect phylogeny.
#[inline]
pub fn is_conflict_free(matrix: &Matrix, delta: &FlipDelta) -> bool {
    find_conflict(matrix, delta).is_none()
}
