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

use crate::bound::error::BoundError;
use phyflip_model::matrix::MatrixError;

/// Errors that abort a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BnbError {
    /// The estimator failed.
    #[error("bounding algorithm failed: {0}")]
    Bound(#[from] BoundError),
    /// The matrix has missing entries and the estimator cannot handle them.
    #[error("estimator '{estimator}' does not support missing values ({count} in matrix)")]
    MissingValuesUnsupported { estimator: String, count: usize },
    /// The estimator's root node does not fit the matrix.
    #[error("invalid root node: {0}")]
    InvalidRootNode(#[from] MatrixError),
    /// The admissibility self-check found a bound above the true optimum.
    #[error("estimator '{estimator}' overestimates the optimum")]
    NotAdmissible { estimator: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_errors_convert() {
        let err: BnbError = BoundError::not_reset("ZeroBound").into();
        assert!(matches!(err, BnbError::Bound(BoundError::InvalidState { .. })));
        assert!(err.to_string().starts_with("bounding algorithm failed"));
    }
}
