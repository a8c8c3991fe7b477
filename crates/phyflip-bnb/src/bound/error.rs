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

use phyflip_model::matrix::MatrixError;

/// Errors raised by bounding algorithms.
///
/// Every variant is fatal for the operation that raised it; estimators never
/// swallow errors and the driver decides whether to abort the search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundError {
    /// The requested operation or estimator does not exist. Signals a wiring
    /// error, for example selecting an unknown estimator by name.
    #[error("{operation} is not implemented for estimator '{estimator}'")]
    NotImplemented {
        estimator: String,
        operation: &'static str,
    },
    /// The estimator cannot accept the supplied state, or it was queried
    /// before being bound to a matrix.
    #[error("estimator '{estimator}' is in an invalid state: {reason}")]
    InvalidState { estimator: String, reason: String },
    /// The matrix or delta handed to the estimator is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] MatrixError),
}

impl BoundError {
    /// Shorthand for an `InvalidState` error.
    #[inline]
    pub fn invalid_state<N, R>(estimator: N, reason: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self::InvalidState {
            estimator: estimator.into(),
            reason: reason.into(),
        }
    }

    /// The error returned when `bound` is called before `reset`.
    #[inline]
    pub fn not_reset<N>(estimator: N) -> Self
    where
        N: Into<String>,
    {
        Self::invalid_state(estimator, "no matrix bound, call `reset` first")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyflip_model::index::Coord;

    #[test]
    fn test_messages_name_the_estimator() {
        let err = BoundError::NotImplemented {
            estimator: "LpBound".to_owned(),
            operation: "construction",
        };
        assert_eq!(
            err.to_string(),
            "construction is not implemented for estimator 'LpBound'"
        );

        let err = BoundError::not_reset("ZeroBound");
        assert!(err.to_string().contains("ZeroBound"));
        assert!(err.to_string().contains("reset"));
    }

    #[test]
    fn test_matrix_errors_convert_to_invalid_input() {
        let err: BoundError = MatrixError::NotFlippable {
            coord: Coord::new(0, 0),
        }
        .into();
        assert!(matches!(err, BoundError::InvalidInput(_)));
    }
}
