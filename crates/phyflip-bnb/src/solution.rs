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

use phyflip_model::{conflict::is_conflict_free, delta::FlipDelta, matrix::Matrix, num::FlipCount};

/// A set of flips that makes the input matrix conflict-free, with its cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipSolution<T> {
    flips: FlipDelta,
    cost: T,
}

impl<T> FlipSolution<T>
where
    T: FlipCount,
{
    /// Creates a new solution.
    #[inline]
    pub fn new(flips: FlipDelta, cost: T) -> Self {
        Self { flips, cost }
    }

    /// Returns the flipped cells.
    #[inline]
    pub fn flips(&self) -> &FlipDelta {
        &self.flips
    }

    /// Returns the number of paid flips.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the number of flipped cells, free ones included.
    #[inline]
    pub fn num_flips(&self) -> usize {
        self.flips.len()
    }

    /// Returns the corrected binary matrix. Missing cells that were not
    /// flipped become 0.
    #[inline]
    pub fn apply(&self, matrix: &Matrix) -> Matrix {
        matrix.resolved(&self.flips)
    }

    /// Returns `true` if the flips resolve every conflict of `matrix`.
    #[inline]
    pub fn is_valid_for(&self, matrix: &Matrix) -> bool {
        matrix.check_delta(&self.flips).is_ok() && is_conflict_free(matrix, &self.flips)
    }

    /// Consumes the solution and returns its flips.
    #[inline]
    pub fn into_flips(self) -> FlipDelta {
        self.flips
    }
}

impl<T> std::fmt::Display for FlipSolution<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FlipSolution(cost: {}, flips: {})", self.cost, self.flips)
    }
}
