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

use num_traits::Zero;
use std::time::Duration;

/// Statistics collected during the execution of the branch-and-bound driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Total nodes expanded or evaluated.
    pub nodes_explored: u64,
    /// Total nodes pushed onto the best-first frontier.
    pub nodes_enqueued: u64,
    /// Total calls to the estimator's `bound`.
    pub bound_calls: u64,
    /// Total returns from a depth-first subtree.
    pub backtracks: u64,
    /// Pruned because the paid flips alone reached the incumbent.
    pub prunings_cost: u64,
    /// Pruned because the lower bound reached the incumbent.
    pub prunings_bound: u64,
    /// Total improving solutions found during the search.
    pub solutions_found: u64,
    /// The deepest level (number of flips) reached in the tree.
    pub max_depth: u64,
    /// The largest best-first frontier observed.
    pub max_frontier: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The lower bound at the root node.
    pub root_lower_bound: T,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            nodes_enqueued: 0,
            bound_calls: 0,
            backtracks: 0,
            prunings_cost: 0,
            prunings_bound: 0,
            solutions_found: 0,
            max_depth: 0,
            max_frontier: 0,
            time_total: Duration::ZERO,
            root_lower_bound: T::zero(),
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_node_enqueued(&mut self) {
        self.nodes_enqueued = self.nodes_enqueued.saturating_add(1);
    }

    #[inline]
    pub fn on_bound_call(&mut self) {
        self.bound_calls = self.bound_calls.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_cost(&mut self) {
        self.prunings_cost = self.prunings_cost.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_frontier_update(&mut self, len: u64) {
        self.max_frontier = self.max_frontier.max(len);
    }

    /// Returns the total number of pruned nodes.
    #[inline]
    pub fn prunings(&self) -> u64 {
        self.prunings_cost.saturating_add(self.prunings_bound)
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Phyflip-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Nodes enqueued:       {}", self.nodes_enqueued)?;
        writeln!(f, "  Bound calls:          {}", self.bound_calls)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Max frontier size:    {}", self.max_frontier)?;
        writeln!(f, "  Prunings (cost):      {}", self.prunings_cost)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Root Lower Bound:     {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_maxima() {
        let mut s = BnbSolverStatistics::<i64>::default();
        s.on_node_explored();
        s.on_node_explored();
        s.on_pruning_cost();
        s.on_pruning_bound();
        s.on_pruning_bound();
        s.on_depth_update(3);
        s.on_depth_update(1);
        s.on_frontier_update(7);
        s.on_frontier_update(2);
        s.set_root_lower_bound(4);

        assert_eq!(s.nodes_explored, 2);
        assert_eq!(s.prunings(), 3);
        assert_eq!(s.max_depth, 3);
        assert_eq!(s.max_frontier, 7);
        assert_eq!(s.root_lower_bound, 4);
        assert!(format!("{}", s).contains("Root Lower Bound:     4"));
    }
}
