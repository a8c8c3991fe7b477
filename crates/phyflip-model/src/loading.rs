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

//! Matrix loader for single-cell genotype (SCS) text files.
//!
//! The format is line oriented and whitespace separated (tabs in practice):
//!
//! ```raw
//! cellIDxmutID  mut0  mut1  mut2
//! cell0         0     1     3
//! cell1         1     0     0
//! ```
//!
//! The first line is an optional header whose first token is ignored and
//! whose remaining tokens name the columns. Every following line holds a row
//! label and one integer code per column: `0`, `1`, or the missing code
//! (`3` by default). Lines starting with `#` and blank lines are skipped.
//! Headers and row labels can be switched off for bare code grids.
//!
//! The loader accepts any `BufRead`, file path, raw reader or string slice,
//! and reports the offending line number for every parse problem.

use crate::matrix::{Cell, Matrix, MatrixError};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read, Write},
    path::Path,
};

/// The error type for the matrix loading process.
#[derive(Debug, thiserror::Error)]
pub enum MatrixLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A token could not be parsed as a cell code.
    #[error("line {line}: could not parse token '{token}' as a cell code")]
    Parse { line: usize, token: String },
    /// A row has a different number of cells than the header or first row.
    #[error("line {line}: expected {expected} cells but found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The input holds no matrix rows.
    #[error("input contains no matrix rows")]
    Empty,
    /// The decoded codes do not form a valid matrix.
    #[error("invalid matrix: {0}")]
    Matrix(#[from] MatrixError),
}

/// A matrix together with its row and column labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMatrix {
    pub matrix: Matrix,
    pub row_names: Vec<String>,
    pub column_names: Vec<String>,
}

impl LoadedMatrix {
    /// Replaces the matrix while keeping the labels, e.g. to write a corrected
    /// matrix under the original names.
    ///
    /// # Panics
    ///
    /// Panics if the new matrix has a different shape.
    pub fn with_matrix(&self, matrix: Matrix) -> LoadedMatrix {
        assert!(
            matrix.num_rows() == self.matrix.num_rows()
                && matrix.num_columns() == self.matrix.num_columns(),
            "called `LoadedMatrix::with_matrix` with a {}x{} matrix, expected {}x{}",
            matrix.num_rows(),
            matrix.num_columns(),
            self.matrix.num_rows(),
            self.matrix.num_columns()
        );
        LoadedMatrix {
            matrix,
            row_names: self.row_names.clone(),
            column_names: self.column_names.clone(),
        }
    }

    /// Writes the matrix in the tab separated SCS format, header included.
    pub fn write_to<W: Write>(&self, mut w: W, missing_code: u8) -> std::io::Result<()> {
        write!(w, "cellIDxmutID")?;
        for name in &self.column_names {
            write!(w, "\t{}", name)?;
        }
        writeln!(w)?;

        for (name, codes) in self
            .row_names
            .iter()
            .zip(self.matrix.to_codes(missing_code))
        {
            write!(w, "{}", name)?;
            for code in codes {
                write!(w, "\t{}", code)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

/// A configurable loader for SCS genotype matrices.
///
/// # Configuration
/// * `missing_code`: the integer code of a missing entry (default `3`).
/// * `header`: whether the first non-comment line names the columns (default `true`).
/// * `row_labels`: whether every row starts with a label token (default `true`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLoader {
    missing_code: u8,
    header: bool,
    row_labels: bool,
}

impl Default for MatrixLoader {
    fn default() -> Self {
        Self {
            missing_code: Cell::DEFAULT_MISSING_CODE,
            header: true,
            row_labels: true,
        }
    }
}

impl MatrixLoader {
    /// Creates a new `MatrixLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the integer code that marks a missing entry. Codes `0` and `1`
    /// are reserved and make loading fail.
    #[inline]
    pub fn missing_code(mut self, code: u8) -> Self {
        self.missing_code = code;
        self
    }

    /// Configures whether the input starts with a header line.
    #[inline]
    pub fn header(mut self, yes: bool) -> Self {
        self.header = yes;
        self
    }

    /// Configures whether every row starts with a label.
    #[inline]
    pub fn row_labels(mut self, yes: bool) -> Self {
        self.row_labels = yes;
        self
    }

    /// Loads a matrix from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<LoadedMatrix, MatrixLoaderError> {
        let mut column_names: Option<Vec<String>> = None;
        let mut row_names = Vec::new();
        let mut rows: Vec<Vec<u8>> = Vec::new();

        for (i, line) in rdr.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();

            if self.header && column_names.is_none() {
                tokens.next();
                column_names = Some(tokens.map(str::to_owned).collect());
                continue;
            }

            let label = if self.row_labels {
                tokens.next().map(str::to_owned)
            } else {
                None
            };

            let codes = tokens
                .map(|t| {
                    t.parse::<u8>().map_err(|_| MatrixLoaderError::Parse {
                        line: line_no,
                        token: t.to_owned(),
                    })
                })
                .collect::<Result<Vec<u8>, _>>()?;

            let expected = column_names
                .as_ref()
                .map(Vec::len)
                .or_else(|| rows.first().map(Vec::len))
                .unwrap_or(codes.len());
            if codes.len() != expected {
                return Err(MatrixLoaderError::RaggedRow {
                    line: line_no,
                    expected,
                    found: codes.len(),
                });
            }

            row_names.push(label.unwrap_or_else(|| format!("cell{}", rows.len())));
            rows.push(codes);
        }

        if rows.is_empty() {
            return Err(MatrixLoaderError::Empty);
        }

        let matrix = Matrix::from_codes_with_missing(&rows, self.missing_code)?;
        let column_names = column_names
            .unwrap_or_else(|| (0..matrix.num_columns()).map(|j| format!("mut{}", j)).collect());

        log::debug!(
            "loaded {}x{} matrix with {} missing entries",
            matrix.num_rows(),
            matrix.num_columns(),
            matrix.num_missing()
        );

        Ok(LoadedMatrix {
            matrix,
            row_names,
            column_names,
        })
    }

    /// Loads a matrix from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<LoadedMatrix, MatrixLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a matrix from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<LoadedMatrix, MatrixLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a matrix from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<LoadedMatrix, MatrixLoaderError> {
        self.from_reader(s.as_bytes())
    }
}
