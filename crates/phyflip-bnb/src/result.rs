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

use crate::{solution::FlipSolution, stats::BnbSolverStatistics};

/// What the search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// A solution whose cost is proven minimal.
    Optimal(FlipSolution<T>),
    /// A solution found before the search was aborted.
    Feasible(FlipSolution<T>),
    /// No solution was recorded.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&FlipSolution<T>> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Unknown => None,
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The tree was exhausted with a solution in hand.
    OptimalityProven,
    /// The tree was exhausted without beating the initial upper bound.
    NoImprovement,
    /// A monitor stopped the search.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "OptimalityProven"),
            TerminationReason::NoImprovement => write!(f, "NoImprovement"),
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn optimal(solution: FlipSolution<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn no_improvement(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Unknown,
            termination_reason: TerminationReason::NoImprovement,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        solution: Option<FlipSolution<T>>,
        reason: R,
        statistics: BnbSolverStatistics<T>,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match solution {
            Some(sol) => SolverResult::Feasible(sol),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the best solution, optimal or not.
    #[inline]
    pub fn solution(&self) -> Option<&FlipSolution<T>> {
        self.result.solution()
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    /// Returns `true` if optimality was proven.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyflip_model::delta::FlipDelta;

    type I = i64;

    #[test]
    fn test_aborted_without_solution_is_unknown() {
        let outcome = BnbSolverOutcome::<I>::aborted(None, "node limit", Default::default());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert!(outcome.solution().is_none());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit".to_owned())
        );
    }

    #[test]
    fn test_aborted_with_solution_is_feasible() {
        let sol = FlipSolution::<I>::new(FlipDelta::new(), 0);
        let outcome = BnbSolverOutcome::aborted(Some(sol.clone()), "time", Default::default());
        assert_eq!(outcome.result(), &SolverResult::Feasible(sol));
        assert!(!outcome.is_optimal());
    }

    #[test]
    fn test_optimal_outcome() {
        let sol = FlipSolution::<I>::new(FlipDelta::new(), 0);
        let outcome = BnbSolverOutcome::optimal(sol, Default::default());
        assert!(outcome.is_optimal());
        assert_eq!(format!("{}", outcome.termination_reason()), "OptimalityProven");
    }
}
