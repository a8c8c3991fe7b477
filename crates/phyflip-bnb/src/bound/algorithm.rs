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

use crate::bound::{error::BoundError, extra::ExtraInfo, state::AlgorithmState, timing::Timings};
use phyflip_model::{
    delta::FlipDelta,
    matrix::{Matrix, MatrixError},
    num::FlipCount,
};

/// A custom root node an estimator may ask the driver to start from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitNode {
    /// Flips applied at the root before branching starts.
    pub delta: FlipDelta,
}

impl InitNode {
    /// Creates a root node with the given flips.
    #[inline]
    pub fn new(delta: FlipDelta) -> Self {
        Self { delta }
    }
}

/// A lower-bound estimator for the minimum-flip perfect phylogeny search.
///
/// `BoundingAlgorithm` decouples the branch-and-bound driver from a particular
/// bounding strategy. The driver calls:
/// - `reset` once per input matrix, before any bound query,
/// - `bound` for every node, with the node's flip delta,
/// - `extra_info` and `priority` right after `bound`, to classify and order the node,
/// - `state` / `set_state` to snapshot and restore incremental data when it
///   jumps between nodes.
///
/// The value returned by `bound` is a lower bound on the **total** number of
/// paid flips of any conflict-free completion of the delta, already paid flips
/// included. It must never exceed the true optimum of that subproblem; the
/// driver prunes on it.
///
/// Only `reset` and `bound` are required. The remaining operations have
/// defaults that describe a stateless estimator without diagnostics, no
/// missing-value support and priority `-after_here`.
pub trait BoundingAlgorithm<T>
where
    T: FlipCount,
{
    /// Returns the name of the estimator.
    ///
    /// Defaults to the implementing type's name without module path or
    /// generic arguments.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Returns whether the estimator accepts matrices with missing entries.
    fn supports_missing(&self) -> bool {
        false
    }

    /// Binds the estimator to a new matrix and discards all data derived from
    /// any previous one.
    ///
    /// Implementations should call [`ensure_supported`] first so that matrices
    /// with missing entries are rejected unless `supports_missing` is `true`.
    fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError>;

    /// Computes a lower bound on the total flips of any conflict-free
    /// completion of `delta`, including the flips already in `delta`.
    ///
    /// Refreshes the data returned by `extra_info`. Fails with
    /// `BoundError::InvalidState` if called before `reset`.
    fn bound(&mut self, delta: &FlipDelta) -> Result<T, BoundError>;

    /// Returns a snapshot of the incremental state, `NoState` if there is none.
    fn state(&self) -> AlgorithmState {
        AlgorithmState::NoState
    }

    /// Restores a snapshot previously produced by `state`.
    ///
    /// The default accepts only `NoState`, matching the default `state`.
    fn set_state(&mut self, state: AlgorithmState) -> Result<(), BoundError> {
        match state {
            AlgorithmState::NoState => Ok(()),
            other => Err(BoundError::invalid_state(
                self.name(),
                format!("stateless estimator cannot restore {}", other.kind()),
            )),
        }
    }

    /// Returns the diagnostics of the most recent `bound` call.
    ///
    /// The returned value is independent of the estimator; changing it does
    /// not affect later reads.
    fn extra_info(&self) -> ExtraInfo {
        ExtraInfo::EMPTY
    }

    /// Returns the queue priority of a node; larger values are explored first.
    ///
    /// `till_here` is the cost paid to reach the node's parent (the node's
    /// own paid cost at the root), `this_step` the cost of the latest flip,
    /// `after_here` the node's bound, and `icf` whether the node is
    /// conflict-free.
    fn priority(&self, till_here: T, this_step: T, after_here: T, icf: bool) -> T {
        let _ = (till_here, this_step, icf);
        -after_here
    }

    /// Returns accumulated per-phase timings. Purely observational.
    fn times(&self) -> Timings {
        Timings::new()
    }

    /// Returns a custom root node, or `None` to start from the empty delta.
    fn init_node(&self) -> Option<InitNode> {
        None
    }
}

impl<T> std::fmt::Debug for dyn BoundingAlgorithm<T>
where
    T: FlipCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingAlgorithm({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn BoundingAlgorithm<T>
where
    T: FlipCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingAlgorithm({})", self.name())
    }
}

impl<T, E> BoundingAlgorithm<T> for Box<E>
where
    T: FlipCount,
    E: BoundingAlgorithm<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn supports_missing(&self) -> bool {
        (**self).supports_missing()
    }

    #[inline]
    fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
        (**self).reset(matrix)
    }

    #[inline]
    fn bound(&mut self, delta: &FlipDelta) -> Result<T, BoundError> {
        (**self).bound(delta)
    }

    #[inline]
    fn state(&self) -> AlgorithmState {
        (**self).state()
    }

    #[inline]
    fn set_state(&mut self, state: AlgorithmState) -> Result<(), BoundError> {
        (**self).set_state(state)
    }

    #[inline]
    fn extra_info(&self) -> ExtraInfo {
        (**self).extra_info()
    }

    #[inline]
    fn priority(&self, till_here: T, this_step: T, after_here: T, icf: bool) -> T {
        (**self).priority(till_here, this_step, after_here, icf)
    }

    #[inline]
    fn times(&self) -> Timings {
        (**self).times()
    }

    #[inline]
    fn init_node(&self) -> Option<InitNode> {
        (**self).init_node()
    }
}

/// Rejects matrices with missing entries unless the estimator supports them.
pub fn ensure_supported<T, E>(estimator: &E, matrix: &Matrix) -> Result<(), BoundError>
where
    T: FlipCount,
    E: BoundingAlgorithm<T> + ?Sized,
{
    if matrix.has_missing() && !estimator.supports_missing() {
        return Err(BoundError::InvalidInput(MatrixError::MissingValues {
            count: matrix.num_missing(),
        }));
    }
    Ok(())
}

/// Returns the bare name of a type: no module path, no generic arguments.
///
/// ```rust
/// use phyflip_bnb::bound::algorithm::short_type_name;
///
/// assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
/// assert_eq!(short_type_name::<String>(), "String");
/// ```
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyflip_model::index::Coord;

    /// Counts paid flips only; relies on every default.
    struct PaidFlips {
        matrix: Option<Matrix>,
    }

    impl BoundingAlgorithm<i64> for PaidFlips {
        fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
            ensure_supported::<i64, _>(self, matrix)?;
            self.matrix = Some(matrix.clone());
            Ok(())
        }

        fn bound(&mut self, delta: &FlipDelta) -> Result<i64, BoundError> {
            let matrix = self
                .matrix
                .as_ref()
                .ok_or_else(|| BoundError::not_reset("PaidFlips"))?;
            Ok(matrix.flip_cost(delta) as i64)
        }
    }

    fn fresh() -> PaidFlips {
        PaidFlips { matrix: None }
    }

    #[test]
    fn test_default_name_is_short_type_name() {
        assert_eq!(BoundingAlgorithm::<i64>::name(&fresh()), "PaidFlips");
        let boxed: Box<dyn BoundingAlgorithm<i64>> = Box::new(fresh());
        assert_eq!(boxed.name(), "PaidFlips");
        assert_eq!(format!("{:?}", boxed), "BoundingAlgorithm(PaidFlips)");
    }

    #[test]
    fn test_default_priority_is_negated_bound() {
        let e = fresh();
        for (c, icf) in [(0, false), (3, true), (17, false)] {
            assert_eq!(e.priority(1, 1, c, icf), -c);
        }
    }

    #[test]
    fn test_defaults_describe_stateless_estimator() {
        let mut e = fresh();
        assert_eq!(BoundingAlgorithm::<i64>::state(&e), AlgorithmState::NoState);
        assert!(
            BoundingAlgorithm::<i64>::set_state(&mut e, AlgorithmState::NoState).is_ok()
        );
        let err = BoundingAlgorithm::<i64>::set_state(
            &mut e,
            AlgorithmState::Composite(vec![AlgorithmState::NoState]),
        )
        .unwrap_err();
        assert!(matches!(err, BoundError::InvalidState { .. }));
        assert!(BoundingAlgorithm::<i64>::extra_info(&e).is_empty());
        assert!(BoundingAlgorithm::<i64>::times(&e).is_empty());
        assert!(BoundingAlgorithm::<i64>::init_node(&e).is_none());
        assert!(!BoundingAlgorithm::<i64>::supports_missing(&e));
    }

    #[test]
    fn test_missing_values_rejected_without_support() {
        let mut e = fresh();
        let m = Matrix::from_codes(&[[0u8, 3], [1, 0]]).unwrap();
        let err = e.reset(&m).unwrap_err();
        assert_eq!(
            err,
            BoundError::InvalidInput(MatrixError::MissingValues { count: 1 })
        );
    }

    #[test]
    fn test_bound_before_reset_is_invalid_state() {
        let mut e = fresh();
        assert!(matches!(
            e.bound(&FlipDelta::new()),
            Err(BoundError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_boxed_estimator_forwards() {
        let mut boxed: Box<dyn BoundingAlgorithm<i64>> = Box::new(fresh());
        let m = Matrix::from_codes(&[[0u8, 1], [1, 0]]).unwrap();
        boxed.reset(&m).unwrap();
        let delta: FlipDelta = [Coord::new(0, 0)].into_iter().collect();
        assert_eq!(boxed.bound(&delta).unwrap(), 1);
    }
}
