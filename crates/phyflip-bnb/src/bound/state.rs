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

//! Opaque estimator snapshots.
//!
//! The driver stores an `AlgorithmState` with every queued node and hands it
//! back through `set_state` when it resumes that node. It never looks inside.
//! Snapshots are plain owned values: taking one copies the estimator's
//! incremental data, so later `bound` calls cannot alter a stored snapshot.

use crate::bound::pairs::PairCountSnapshot;

/// A snapshot of an estimator's incremental state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AlgorithmState {
    /// The estimator keeps no incremental state.
    #[default]
    NoState,
    /// Column-pair counters of `ConflictPairBound`.
    PairCounts(Box<PairCountSnapshot>),
    /// One snapshot per component of a combined estimator, in component order.
    Composite(Vec<AlgorithmState>),
}

impl AlgorithmState {
    /// Returns a short name of the variant, used in error messages.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            AlgorithmState::NoState => "NoState",
            AlgorithmState::PairCounts(_) => "PairCounts",
            AlgorithmState::Composite(_) => "Composite",
        }
    }

    /// Returns `true` for `NoState`.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, AlgorithmState::NoState)
    }
}

impl std::fmt::Display for AlgorithmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmState::NoState => write!(f, "NoState"),
            AlgorithmState::PairCounts(s) => write!(f, "PairCounts({} flips)", s.num_flips()),
            AlgorithmState::Composite(parts) => {
                write!(f, "Composite(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_no_state() {
        assert!(AlgorithmState::default().is_none());
        assert_eq!(AlgorithmState::default().kind(), "NoState");
    }

    #[test]
    fn test_composite_display() {
        let s = AlgorithmState::Composite(vec![AlgorithmState::NoState, AlgorithmState::NoState]);
        assert_eq!(s.kind(), "Composite");
        assert_eq!(format!("{}", s), "Composite(NoState, NoState)");
    }
}
