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

//! Tri-state genotype matrices.
//!
//! A `Matrix` is the fixed input of a minimum-flip search: rows are items
//! (single cells, taxa), columns are features (mutations), and every cell is
//! `Zero`, `One` or `Missing`. The matrix is stored row-major in a flat vector
//! and validated at construction, so a `Matrix` value is always rectangular and
//! only contains the three admissible states.
//!
//! Cells are only ever changed from 0 (or missing) to 1 by the search, and the
//! tentative changes are kept outside the matrix in a `FlipDelta`. The helpers
//! `value`, `flip_cost` and `check_delta` interpret a delta against the
//! original matrix.

use crate::{
    delta::FlipDelta,
    index::{ColumnIndex, Coord, RowIndex},
};

/// The state of a single matrix cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Zero,
    One,
    Missing,
}

impl Cell {
    /// The integer code used for missing entries in SCS text files.
    pub const DEFAULT_MISSING_CODE: u8 = 3;

    /// Decodes an integer cell code. Returns `None` for unknown codes.
    ///
    /// A `missing_code` of `0` or `1` never matches, since those codes always
    /// decode to `Zero` and `One`.
    #[inline]
    pub fn from_code(code: u8, missing_code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Zero),
            1 => Some(Cell::One),
            c if c == missing_code => Some(Cell::Missing),
            _ => None,
        }
    }

    /// Encodes this cell using the given missing code.
    #[inline]
    pub fn code(self, missing_code: u8) -> u8 {
        match self {
            Cell::Zero => 0,
            Cell::One => 1,
            Cell::Missing => missing_code,
        }
    }

    /// Returns `true` if the cell is a 1.
    #[inline(always)]
    pub fn is_one(self) -> bool {
        matches!(self, Cell::One)
    }

    /// Returns `true` if the search may flip this cell to 1.
    #[inline(always)]
    pub fn is_flippable(self) -> bool {
        !self.is_one()
    }

    /// The number of flips charged for setting this cell to 1.
    /// Real zeros cost one flip, missing entries are free.
    #[inline(always)]
    pub fn flip_cost(self) -> usize {
        match self {
            Cell::Zero => 1,
            Cell::One | Cell::Missing => 0,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Zero => write!(f, "0"),
            Cell::One => write!(f, "1"),
            Cell::Missing => write!(f, "?"),
        }
    }
}

/// Errors raised for malformed matrices and deltas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A row does not have the same length as the first row.
    #[error("row {row} has {found} cells but the matrix has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell carries a code outside `{0, 1, missing}`.
    #[error("cell ({row}, {column}) has invalid code {code}, expected 0, 1 or {missing_code}")]
    InvalidCode {
        row: usize,
        column: usize,
        code: u8,
        missing_code: u8,
    },
    /// A coordinate lies outside the matrix.
    #[error("coordinate {coord} is outside the {num_rows}x{num_columns} matrix")]
    OutOfBounds {
        coord: Coord,
        num_rows: usize,
        num_columns: usize,
    },
    /// A delta tries to flip a cell that is already 1 in the input.
    #[error("cell {coord} is already 1 in the input matrix and cannot be flipped")]
    NotFlippable { coord: Coord },
    /// The missing code collides with the codes of `Zero` or `One`.
    #[error("missing code {code} is reserved for 0 and 1 cells")]
    ReservedMissingCode { code: u8 },
    /// The matrix contains missing values but the consumer cannot handle them.
    #[error("matrix contains {count} missing values which are not supported here")]
    MissingValues { count: usize },
}

/// A rectangular tri-state matrix stored in row-major order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    num_rows: usize,
    num_columns: usize,
    cells: Vec<Cell>,
    num_missing: usize,
}

impl Matrix {
    /// Creates an all-zero matrix of the given shape.
    pub fn zeros(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
            cells: vec![Cell::Zero; num_rows * num_columns],
            num_missing: 0,
        }
    }

    /// Builds a matrix from rows of cells.
    ///
    /// Returns `MatrixError::RaggedRow` if the rows differ in length.
    pub fn from_cells<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[Cell]>,
    {
        let num_columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * num_columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != num_columns {
                return Err(MatrixError::RaggedRow {
                    row: i,
                    expected: num_columns,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        let num_missing = cells.iter().filter(|c| **c == Cell::Missing).count();

        Ok(Self {
            num_rows: rows.len(),
            num_columns,
            cells,
            num_missing,
        })
    }

    /// Builds a matrix from integer codes, with `3` marking missing entries.
    pub fn from_codes<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[u8]>,
    {
        Self::from_codes_with_missing(rows, Cell::DEFAULT_MISSING_CODE)
    }

    /// Builds a matrix from integer codes using a custom missing code.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ReservedMissingCode` if `missing_code` is `0` or
    /// `1`, and `MatrixError::InvalidCode` for any cell outside `{0, 1, missing}`.
    pub fn from_codes_with_missing<R>(rows: &[R], missing_code: u8) -> Result<Self, MatrixError>
    where
        R: AsRef<[u8]>,
    {
        if missing_code <= 1 {
            return Err(MatrixError::ReservedMissingCode { code: missing_code });
        }

        let mut decoded: Vec<Vec<Cell>> = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row
                .as_ref()
                .iter()
                .enumerate()
                .map(|(j, &code)| {
                    Cell::from_code(code, missing_code).ok_or(MatrixError::InvalidCode {
                        row: i,
                        column: j,
                        code,
                        missing_code,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            decoded.push(row);
        }
        Self::from_cells(&decoded)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Returns the number of missing entries.
    #[inline]
    pub fn num_missing(&self) -> usize {
        self.num_missing
    }

    /// Returns `true` if any entry is missing.
    #[inline]
    pub fn has_missing(&self) -> bool {
        self.num_missing > 0
    }

    /// Returns the number of cells that may be flipped (zeros and missing).
    pub fn num_flippable(&self) -> usize {
        self.cells.iter().filter(|c| c.is_flippable()).count()
    }

    #[inline(always)]
    fn flat_index(&self, row: RowIndex, column: ColumnIndex) -> usize {
        row.get() * self.num_columns + column.get()
    }

    /// Returns `true` if the coordinate lies inside the matrix.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row.get() < self.num_rows && coord.column.get() < self.num_columns
    }

    /// Returns the original value of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is out of bounds.
    #[inline]
    pub fn get(&self, row: RowIndex, column: ColumnIndex) -> Cell {
        assert!(
            row.get() < self.num_rows && column.get() < self.num_columns,
            "called `Matrix::get` with ({}, {}) on a {}x{} matrix",
            row.get(),
            column.get(),
            self.num_rows,
            self.num_columns
        );
        self.cells[self.flat_index(row, column)]
    }

    /// Sets the original value of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is out of bounds.
    pub fn set(&mut self, row: RowIndex, column: ColumnIndex, cell: Cell) {
        assert!(
            row.get() < self.num_rows && column.get() < self.num_columns,
            "called `Matrix::set` with ({}, {}) on a {}x{} matrix",
            row.get(),
            column.get(),
            self.num_rows,
            self.num_columns
        );
        let index = self.flat_index(row, column);
        let old = std::mem::replace(&mut self.cells[index], cell);
        if old == Cell::Missing {
            self.num_missing -= 1;
        }
        if cell == Cell::Missing {
            self.num_missing += 1;
        }
    }

    /// Returns the cells of one row.
    #[inline]
    pub fn row(&self, row: RowIndex) -> &[Cell] {
        let start = row.get() * self.num_columns;
        &self.cells[start..start + self.num_columns]
    }

    /// Returns the current value of a cell with the flips of `delta` applied.
    #[inline]
    pub fn value(&self, coord: Coord, delta: &FlipDelta) -> Cell {
        if delta.contains(coord) {
            Cell::One
        } else {
            self.get(coord.row, coord.column)
        }
    }

    /// Iterates over all coordinates whose cell may be flipped, row-major.
    pub fn flippable_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_flippable())
            .map(|(i, _)| Coord::new(i / self.num_columns, i % self.num_columns))
    }

    /// Checks that every flip of `delta` targets an in-bounds 0 or missing cell.
    pub fn check_delta(&self, delta: &FlipDelta) -> Result<(), MatrixError> {
        for coord in delta.iter() {
            if !self.contains(coord) {
                return Err(MatrixError::OutOfBounds {
                    coord,
                    num_rows: self.num_rows,
                    num_columns: self.num_columns,
                });
            }
            if self.get(coord.row, coord.column).is_one() {
                return Err(MatrixError::NotFlippable { coord });
            }
        }
        Ok(())
    }

    /// Returns the number of paid flips in `delta` (flipped real zeros).
    ///
    /// Coordinates outside the matrix are ignored; use `check_delta` first.
    pub fn flip_cost(&self, delta: &FlipDelta) -> usize {
        delta
            .iter()
            .filter(|c| self.contains(*c))
            .map(|c| self.get(c.row, c.column).flip_cost())
            .sum()
    }

    /// Returns a binary matrix with `delta` applied. Missing entries that were
    /// not flipped become 0.
    pub fn resolved(&self, delta: &FlipDelta) -> Matrix {
        let mut out = Matrix::zeros(self.num_rows, self.num_columns);
        for (i, cell) in self.cells.iter().enumerate() {
            let coord = Coord::new(i / self.num_columns, i % self.num_columns);
            if cell.is_one() || delta.contains(coord) {
                out.cells[i] = Cell::One;
            }
        }
        out
    }

    /// Encodes the matrix as rows of integer codes.
    pub fn to_codes(&self, missing_code: u8) -> Vec<Vec<u8>> {
        (0..self.num_rows)
            .map(|r| {
                self.row(RowIndex::new(r))
                    .iter()
                    .map(|c| c.code(missing_code))
                    .collect()
            })
            .collect()
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Matrix({}x{}, missing: {})",
            self.num_rows, self.num_columns, self.num_missing
        )
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.num_rows {
            for (j, cell) in self.row(RowIndex::new(r)).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codes_decodes_all_states() {
        let m = Matrix::from_codes(&[[0, 1, 3], [1, 0, 0]]).unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_columns(), 3);
        assert_eq!(m.get(RowIndex::new(0), ColumnIndex::new(2)), Cell::Missing);
        assert_eq!(m.get(RowIndex::new(1), ColumnIndex::new(0)), Cell::One);
        assert_eq!(m.num_missing(), 1);
        assert!(m.has_missing());
        assert_eq!(m.num_flippable(), 4);
    }

    #[test]
    fn test_from_codes_rejects_unknown_code() {
        let err = Matrix::from_codes(&[[0, 2]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidCode {
                row: 0,
                column: 1,
                code: 2,
                missing_code: 3
            }
        );
    }

    #[test]
    fn test_from_cells_rejects_ragged_rows() {
        let rows = vec![vec![Cell::Zero, Cell::One], vec![Cell::One]];
        let err = Matrix::from_cells(&rows).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_custom_missing_code() {
        let m = Matrix::from_codes_with_missing(&[[0, 9], [1, 0]], 9).unwrap();
        assert_eq!(m.get(RowIndex::new(0), ColumnIndex::new(1)), Cell::Missing);
        assert_eq!(m.to_codes(3), vec![vec![0, 3], vec![1, 0]]);
    }

    #[test]
    fn test_missing_code_cannot_shadow_zero_or_one() {
        for code in [0u8, 1] {
            assert_eq!(
                Matrix::from_codes_with_missing(&[[0u8, 1]], code),
                Err(MatrixError::ReservedMissingCode { code })
            );
        }
        assert_eq!(Cell::from_code(1, 1), Some(Cell::One));
    }

    #[test]
    fn test_set_tracks_missing_count() {
        let mut m = Matrix::zeros(2, 2);
        m.set(RowIndex::new(0), ColumnIndex::new(0), Cell::Missing);
        assert_eq!(m.num_missing(), 1);
        m.set(RowIndex::new(0), ColumnIndex::new(0), Cell::One);
        assert_eq!(m.num_missing(), 0);
    }

    #[test]
    fn test_flip_cost_charges_only_real_zeros() {
        let m = Matrix::from_codes(&[[0, 3], [1, 0]]).unwrap();
        let delta: FlipDelta = [Coord::new(0, 0), Coord::new(0, 1)].into_iter().collect();
        assert_eq!(m.flip_cost(&delta), 1);
        assert_eq!(m.value(Coord::new(0, 1), &delta), Cell::One);
        assert_eq!(m.value(Coord::new(1, 1), &delta), Cell::Zero);
    }

    #[test]
    fn test_check_delta_rejects_bad_coordinates() {
        let m = Matrix::from_codes(&[[0, 1]]).unwrap();

        let on_one: FlipDelta = [Coord::new(0, 1)].into_iter().collect();
        assert_eq!(
            m.check_delta(&on_one),
            Err(MatrixError::NotFlippable {
                coord: Coord::new(0, 1)
            })
        );

        let outside: FlipDelta = [Coord::new(4, 0)].into_iter().collect();
        assert!(matches!(
            m.check_delta(&outside),
            Err(MatrixError::OutOfBounds { .. })
        ));

        assert!(m.check_delta(&FlipDelta::new()).is_ok());
    }

    #[test]
    fn test_resolved_applies_delta_and_clears_missing() {
        let m = Matrix::from_codes(&[[0, 3], [1, 0]]).unwrap();
        let delta: FlipDelta = [Coord::new(1, 1)].into_iter().collect();
        let resolved = m.resolved(&delta);
        assert_eq!(resolved.to_codes(3), vec![vec![0, 0], vec![1, 1]]);
        assert!(!resolved.has_missing());
    }

    #[test]
    fn test_flippable_cells_are_row_major() {
        let m = Matrix::from_codes(&[[1, 0], [3, 1]]).unwrap();
        let cells: Vec<Coord> = m.flippable_cells().collect();
        assert_eq!(cells, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_display_renders_rows() {
        let m = Matrix::from_codes(&[[0, 1], [3, 0]]).unwrap();
        assert_eq!(format!("{}", m), "0 1\n? 0\n");
    }
}
