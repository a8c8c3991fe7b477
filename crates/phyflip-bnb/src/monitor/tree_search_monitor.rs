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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait, `SearchCommand` and `PruneReason`
//! for observing and controlling the branch-and-bound driver. A monitor can
//! stop the search through `search_command` (default: `Continue`).
//!
//! Lifecycle
//! - enter → step → bound → {prune | solution | branch} → backtrack → exit
//! - `BnbSolverStatistics` is passed to every callback.
//!
//! Callbacks take `&mut self`; monitors are single-threaded.

use crate::{bound::extra::ExtraInfo, solution::FlipSolution, stats::BnbSolverStatistics};
use phyflip_model::{conflict::Conflict, delta::FlipDelta, matrix::Matrix, num::FlipCount};

/// The monitor's verdict on whether the search may go on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for pruning a node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PruneReason {
    /// The flips already paid reach the incumbent.
    CostDominated,
    /// The lower bound reaches the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::CostDominated => write!(f, "CostDominated"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: FlipCount,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, matrix: &Matrix, statistics: &BnbSolverStatistics<T>);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called before every step to decide whether to continue.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search with the delta about to be processed.
    fn on_step(&mut self, delta: &FlipDelta, statistics: &BnbSolverStatistics<T>);
    /// Called after the estimator has bounded `delta`.
    fn on_bound_computed(
        &mut self,
        delta: &FlipDelta,
        bound: T,
        extra: &ExtraInfo,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when a node is pruned.
    fn on_prune(
        &mut self,
        delta: &FlipDelta,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when a node is split on `conflict` into `children` subtrees.
    fn on_branch(
        &mut self,
        delta: &FlipDelta,
        conflict: &Conflict,
        children: usize,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when depth-first search returns to a parent node.
    fn on_backtrack(&mut self, delta: &FlipDelta, statistics: &BnbSolverStatistics<T>);
    /// Called when a new best solution is found.
    fn on_solution_found(&mut self, solution: &FlipSolution<T>, statistics: &BnbSolverStatistics<T>);
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: FlipCount,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter_search(&mut self, matrix: &Matrix, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(matrix, statistics)
    }

    #[inline]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    #[inline]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        (**self).search_command(statistics)
    }

    #[inline]
    fn on_step(&mut self, delta: &FlipDelta, statistics: &BnbSolverStatistics<T>) {
        (**self).on_step(delta, statistics)
    }

    #[inline]
    fn on_bound_computed(
        &mut self,
        delta: &FlipDelta,
        bound: T,
        extra: &ExtraInfo,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_bound_computed(delta, bound, extra, statistics)
    }

    #[inline]
    fn on_prune(
        &mut self,
        delta: &FlipDelta,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_prune(delta, reason, statistics)
    }

    #[inline]
    fn on_branch(
        &mut self,
        delta: &FlipDelta,
        conflict: &Conflict,
        children: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_branch(delta, conflict, children, statistics)
    }

    #[inline]
    fn on_backtrack(&mut self, delta: &FlipDelta, statistics: &BnbSolverStatistics<T>) {
        (**self).on_backtrack(delta, statistics)
    }

    #[inline]
    fn on_solution_found(&mut self, solution: &FlipSolution<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_solution_found(solution, statistics)
    }
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: FlipCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: FlipCount,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
