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

use crate::bound::{
    algorithm::{BoundingAlgorithm, ensure_supported},
    error::BoundError,
    timing::{PHASE_BOUND, PHASE_RESET, Timings},
};
use phyflip_model::{delta::FlipDelta, matrix::Matrix, num::FlipCount};
use std::time::Instant;

/// The trivial estimator: the bound of a node is the number of flips it has
/// already paid for.
///
/// Admissible for every matrix, stateless, and without diagnostics. With
/// this estimator the search degenerates to uniform-cost enumeration, which
/// makes it the reference point for stronger bounds.
#[derive(Debug, Clone)]
pub struct ZeroBound<T> {
    matrix: Option<Matrix>,
    times: Timings,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for ZeroBound<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ZeroBound<T> {
    /// Creates an unbound `ZeroBound`.
    #[inline]
    pub fn new() -> Self {
        Self {
            matrix: None,
            times: Timings::new(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> BoundingAlgorithm<T> for ZeroBound<T>
where
    T: FlipCount,
{
    #[inline]
    fn supports_missing(&self) -> bool {
        true
    }

    fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
        let start = Instant::now();
        ensure_supported::<T, _>(self, matrix)?;
        self.matrix = Some(matrix.clone());
        self.times.record(PHASE_RESET, start.elapsed());
        Ok(())
    }

    fn bound(&mut self, delta: &FlipDelta) -> Result<T, BoundError> {
        let start = Instant::now();
        let matrix = self
            .matrix
            .as_ref()
            .ok_or_else(|| BoundError::not_reset("ZeroBound"))?;
        matrix.check_delta(delta)?;
        let paid = T::from_count(matrix.flip_cost(delta));
        self.times.record(PHASE_BOUND, start.elapsed());
        Ok(paid)
    }

    fn times(&self) -> Timings {
        self.times.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::state::AlgorithmState;
    use phyflip_model::index::Coord;

    #[test]
    fn test_bound_counts_paid_flips() {
        let m = Matrix::from_codes(&[[0u8, 3], [1, 0]]).unwrap();
        let mut e = ZeroBound::<i64>::new();
        e.reset(&m).unwrap();
        assert_eq!(e.bound(&FlipDelta::new()).unwrap(), 0);

        let delta: FlipDelta = [Coord::new(0, 0), Coord::new(0, 1)].into_iter().collect();
        // (0, 1) is missing and free.
        assert_eq!(e.bound(&delta).unwrap(), 1);
    }

    #[test]
    fn test_stateless_contract() {
        let mut e = ZeroBound::<i64>::new();
        assert_eq!(e.name(), "ZeroBound");
        assert!(e.state().is_none());
        assert!(e.set_state(AlgorithmState::NoState).is_ok());
        assert!(e.extra_info().is_empty());
    }

    #[test]
    fn test_two_column_example_is_deterministic() {
        let m = Matrix::from_codes(&[[0u8, 1], [1, 0]]).unwrap();
        let mut e = ZeroBound::<i64>::new();
        e.reset(&m).unwrap();
        assert_eq!(e.bound(&FlipDelta::new()).unwrap(), 0);
        assert_eq!(e.bound(&FlipDelta::new()).unwrap(), 0);
        assert!(e.extra_info().is_empty());

        let state = e.state();
        e.set_state(state.clone()).unwrap();
        e.set_state(state).unwrap();
        assert_eq!(e.bound(&FlipDelta::new()).unwrap(), 0);
    }

    #[test]
    fn test_rejects_bad_delta() {
        let m = Matrix::from_codes(&[[1u8, 0]]).unwrap();
        let mut e = ZeroBound::<i64>::new();
        e.reset(&m).unwrap();
        let delta: FlipDelta = [Coord::new(0, 0)].into_iter().collect();
        assert!(matches!(e.bound(&delta), Err(BoundError::InvalidInput(_))));
    }

    #[test]
    fn test_records_timings() {
        let m = Matrix::from_codes(&[[1u8, 0]]).unwrap();
        let mut e = ZeroBound::<i64>::new();
        e.reset(&m).unwrap();
        e.bound(&FlipDelta::new()).unwrap();
        e.bound(&FlipDelta::new()).unwrap();
        let t = e.times();
        assert_eq!(t.calls(PHASE_RESET), 1);
        assert_eq!(t.calls(PHASE_BOUND), 2);
    }
}
