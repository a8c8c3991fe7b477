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
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    solution::FlipSolution,
    stats::BnbSolverStatistics,
};
use phyflip_model::{conflict::Conflict, delta::FlipDelta, matrix::Matrix, num::FlipCount};
use std::time::{Duration, Instant};

/// Emits a progress line through `log::info!` at most once per `log_interval`.
///
/// The clock is only read when `nodes_explored & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
    last_bound: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: FlipCount,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
            last_bound: None,
        }
    }

    fn log_header(&self) {
        log::info!(
            "{:<9} | {:<12} | {:<7} | {:<10} | {:<10} | {:<12}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Best",
            "Bound",
            "Pruned"
        );
    }

    fn log_line(&mut self, delta: &FlipDelta, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match self.best_cost {
            Some(cost) => cost.to_string(),
            None => "Inf".to_owned(),
        };
        let bound = match self.last_bound {
            Some(bound) => bound.to_string(),
            None => "-".to_owned(),
        };

        log::info!(
            "{:<9} | {:<12} | {:<7} | {:<10} | {:<10} | {:<12}",
            format!("{:.1}s", elapsed),
            stats.nodes_explored,
            delta.len(),
            best,
            bound,
            stats.prunings()
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: FlipCount,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1023)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:.1}s, clock_check_mask: {})",
            self.log_interval.as_secs_f32(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: FlipCount,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, matrix: &Matrix, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        self.last_bound = None;
        log::info!(
            "search started on {}x{} matrix ({} missing)",
            matrix.num_rows(),
            matrix.num_columns(),
            matrix.num_missing()
        );
        self.log_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        log::info!(
            "search finished: {} nodes, {} solutions, {:.2?}",
            statistics.nodes_explored,
            statistics.solutions_found,
            statistics.time_total
        );
    }

    fn on_step(&mut self, delta: &FlipDelta, statistics: &BnbSolverStatistics<T>) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(delta, statistics);
        }
    }

    fn on_bound_computed(
        &mut self,
        _delta: &FlipDelta,
        bound: T,
        _extra: &ExtraInfo,
        _statistics: &BnbSolverStatistics<T>,
    ) {
        self.last_bound = Some(bound);
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

    fn on_solution_found(&mut self, solution: &FlipSolution<T>, statistics: &BnbSolverStatistics<T>) {
        self.best_cost = Some(solution.cost());
        log::info!(
            "new incumbent: cost {} with {} flips after {} nodes",
            solution.cost(),
            solution.num_flips(),
            statistics.nodes_explored
        );
    }
}
