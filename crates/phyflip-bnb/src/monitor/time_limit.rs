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
use std::time::{Duration, Instant};

/// A monitor that terminates the search after a specified duration.
///
/// Checks the clock only every `check_interval` steps.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor<T> {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    steps_since_last_check: u64,
    _marker: PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Creates a monitor that looks at the clock every `check_interval` steps.
    /// A larger interval lowers overhead but may overshoot the limit slightly.
    pub fn new(time_limit: Duration, check_interval: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            check_interval: check_interval.max(1),
            steps_since_last_check: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a monitor that checks the clock every 1,000 steps.
    pub fn with_default_check_interval(time_limit: Duration) -> Self {
        Self::new(time_limit, 1_000)
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: FlipCount,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &Matrix, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Some(Instant::now());
        self.steps_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = None;
    }

    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        self.steps_since_last_check = self.steps_since_last_check.saturating_add(1);

        if self.steps_since_last_check >= self.check_interval {
            self.steps_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() >= self.time_limit
            {
                return SearchCommand::Terminate(format!(
                    "Time limit of {:.3}s exceeded",
                    self.time_limit.as_secs_f64()
                ));
            }
        }

        SearchCommand::Continue
    }

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
