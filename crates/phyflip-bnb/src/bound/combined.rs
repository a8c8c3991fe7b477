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
    algorithm::{BoundingAlgorithm, InitNode},
    error::BoundError,
    extra::ExtraInfo,
    state::AlgorithmState,
    timing::Timings,
};
use phyflip_model::{delta::FlipDelta, matrix::Matrix, num::FlipCount};

/// Combines two estimators and reports the tighter (maximum) bound.
///
/// $$ LB = \max(LB_{\text{first}}, LB_{\text{second}}) $$
///
/// The maximum of two admissible bounds is admissible. The first estimator
/// leads: its priority rule and root node are used, and its diagnostics win
/// where both report the same field. Snapshots are `Composite` states with one
/// entry per component.
#[derive(Debug, Clone)]
pub struct MaxBound<T, A, B> {
    first: A,
    second: B,
    name: String,
    extra: ExtraInfo,
    _marker: std::marker::PhantomData<T>,
}

impl<T, A, B> MaxBound<T, A, B>
where
    T: FlipCount,
    A: BoundingAlgorithm<T>,
    B: BoundingAlgorithm<T>,
{
    /// Creates a new `MaxBound` of two estimators.
    pub fn new(first: A, second: B) -> Self {
        let name = format!("MaxBound({}, {})", first.name(), second.name());
        Self {
            first,
            second,
            name,
            extra: ExtraInfo::EMPTY,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the first component.
    #[inline]
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Returns the second component.
    #[inline]
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Consumes the combination and returns both components.
    #[inline]
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<T, A, B> BoundingAlgorithm<T> for MaxBound<T, A, B>
where
    T: FlipCount,
    A: BoundingAlgorithm<T>,
    B: BoundingAlgorithm<T>,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn supports_missing(&self) -> bool {
        self.first.supports_missing() && self.second.supports_missing()
    }

    fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
        self.extra = ExtraInfo::EMPTY;
        self.first.reset(matrix)?;
        self.second.reset(matrix)
    }

    fn bound(&mut self, delta: &FlipDelta) -> Result<T, BoundError> {
        let a = self.first.bound(delta)?;
        let b = self.second.bound(delta)?;
        self.extra = self.first.extra_info().merge(self.second.extra_info());
        Ok(a.max(b))
    }

    fn state(&self) -> AlgorithmState {
        AlgorithmState::Composite(vec![self.first.state(), self.second.state()])
    }

    fn set_state(&mut self, state: AlgorithmState) -> Result<(), BoundError> {
        match state {
            AlgorithmState::Composite(parts) if parts.len() == 2 => {
                let mut parts = parts.into_iter();
                let first = parts.next().unwrap_or_default();
                let second = parts.next().unwrap_or_default();
                self.first.set_state(first)?;
                self.second.set_state(second)?;
                self.extra = self.first.extra_info().merge(self.second.extra_info());
                Ok(())
            }
            other => Err(BoundError::invalid_state(
                self.name.clone(),
                format!("expected a Composite state of 2 parts, got {}", other),
            )),
        }
    }

    #[inline]
    fn extra_info(&self) -> ExtraInfo {
        self.extra
    }

    #[inline]
    fn priority(&self, till_here: T, this_step: T, after_here: T, icf: bool) -> T {
        self.first.priority(till_here, this_step, after_here, icf)
    }

    fn times(&self) -> Timings {
        let mut times = self.first.times();
        times.merge(&self.second.times());
        times
    }

    #[inline]
    fn init_node(&self) -> Option<InitNode> {
        self.first.init_node().or_else(|| self.second.init_node())
    }
}
