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

//! Per-phase timing tables for estimators. Purely observational.

use rustc_hash::FxHashMap;
use std::time::Duration;

/// Phase name used for time spent in `reset`.
pub const PHASE_RESET: &str = "reset";
/// Phase name used for time spent in `bound`.
pub const PHASE_BOUND: &str = "bound";

/// Accumulated time and call count of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseTiming {
    pub total: Duration,
    pub calls: u64,
}

/// Accumulated elapsed time per named phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timings {
    phases: FxHashMap<&'static str, PhaseTiming>,
}

impl Timings {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one call of `phase` taking `elapsed`.
    #[inline]
    pub fn record(&mut self, phase: &'static str, elapsed: Duration) {
        let entry = self.phases.entry(phase).or_default();
        entry.total = entry.total.saturating_add(elapsed);
        entry.calls = entry.calls.saturating_add(1);
    }

    /// Returns the timing of a phase, if it was ever recorded.
    #[inline]
    pub fn get(&self, phase: &str) -> Option<PhaseTiming> {
        self.phases.get(phase).copied()
    }

    /// Returns the accumulated time of a phase, zero if never recorded.
    #[inline]
    pub fn total(&self, phase: &str) -> Duration {
        self.get(phase).map_or(Duration::ZERO, |t| t.total)
    }

    /// Returns the number of recorded calls of a phase.
    #[inline]
    pub fn calls(&self, phase: &str) -> u64 {
        self.get(phase).map_or(0, |t| t.calls)
    }

    /// Returns `true` if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Adds every phase of `other` into `self`.
    pub fn merge(&mut self, other: &Timings) {
        for (phase, timing) in &other.phases {
            let entry = self.phases.entry(phase).or_default();
            entry.total = entry.total.saturating_add(timing.total);
            entry.calls = entry.calls.saturating_add(timing.calls);
        }
    }

    /// Returns the phases sorted by name.
    pub fn sorted(&self) -> Vec<(&'static str, PhaseTiming)> {
        let mut phases: Vec<_> = self.phases.iter().map(|(k, v)| (*k, *v)).collect();
        phases.sort_unstable_by_key(|(k, _)| *k);
        phases
    }

    /// Forgets all recorded phases.
    #[inline]
    pub fn clear(&mut self) {
        self.phases.clear();
    }
}

impl std::fmt::Display for Timings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timings(")?;
        for (i, (phase, timing)) in self.sorted().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.2?} / {} calls", phase, timing.total, timing.calls)?;
        }
        write!(f, ")")
    }
}
