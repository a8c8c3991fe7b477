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

use crate::{
    bound::extra::ExtraInfo,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    solution::FlipSolution,
    stats::BnbSolverStatistics,
};
use phyflip_model::{conflict::Conflict, delta::FlipDelta, matrix::Matrix, num::FlipCount};
use std::marker::PhantomData;

/// A monitor that terminates the search once `limit` nodes have been explored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor<T> {
    limit: u64,
    _marker: PhantomData<T>,
}

impl<T> NodeLimitMonitor<T> {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<T> TreeSearchMonitor<T> for NodeLimitMonitor<T>
where
    T: FlipCount,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if statistics.nodes_explored >= self.limit {
            return SearchCommand::Terminate(format!(
                "Node limit of {} nodes reached",
                self.limit
            ));
        }
        SearchCommand::Continue
    }

    fn on_enter_search(&mut self, _matrix: &Matrix, _statistics: &BnbSolverStatistics<T>) {}
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}
    fn on_step(&mut self, _delta: &FlipDelta, _statistics: &BnbSolverStatistics<T>) {}
    fn on_bound_computed(
        &mut self,
        _delta: &FlipDelta,
        _bound: T,
        _extra: &ExtraInfo,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
    fn on_prune(
        &mut self,
        _delta: &FlipDelta,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
    fn on_branch(
        &mut self,
        _delta: &FlipDelta,
        _conflict: &Conflict,
        _children: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
    fn on_backtrack(&mut self, _delta: &FlipDelta, _statistics: &BnbSolverStatistics<T>) {}
    fn on_solution_found(
        &mut self,
        _solution: &FlipSolution<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }
}
