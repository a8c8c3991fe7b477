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

//! Column-pair conflict bound.
//!
//! For every column pair `(p, q)` the estimator keeps counters of the row
//! patterns `(1, 0)`, `(0, 1)` and `(1, 1)` in the current matrix (original
//! values with the delta applied, missing read as 0 for pattern purposes).
//! A pair conflicts while all three counters are positive.
//!
//! Flips only turn entries into 1, so a conflicting pair is resolved either by
//! flipping `q` in every `(1, 0)` row or by flipping `p` in every `(0, 1)` row.
//! The cheaper side costs `min(paid_one_zero, paid_zero_one)`, where the
//! `paid_*` counters skip rows whose 0 is really a missing entry (free to
//! flip). Pairs that share no column need disjoint flips, so the costs of any
//! column-disjoint set of conflicting pairs add up. A greedy pass picks such a
//! set by descending cost:
//!
//! ```text
//! bound(delta) = paid(delta) + sum of picked pair costs
//! ```
//!
//! Counters are updated incrementally: moving from the applied delta to a new
//! one only touches the rows of the cells that differ, `O(changes * m)` per
//! call. Larger jumps fall back to a full `O(n * m^2)` rebuild.

use crate::bound::{
    algorithm::{BoundingAlgorithm, ensure_supported},
    error::BoundError,
    extra::ExtraInfo,
    state::AlgorithmState,
    timing::{PHASE_BOUND, PHASE_RESET, Timings},
};
use phyflip_model::{
    delta::FlipDelta,
    index::{ColumnIndex, Coord},
    matrix::{Cell, Matrix},
    num::FlipCount,
};
use std::time::Instant;

/// Row-pattern counters of one column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairCounts {
    one_zero: u32,
    zero_one: u32,
    one_one: u32,
    one_zero_paid: u32,
    zero_one_paid: u32,
}

impl PairCounts {
    /// The contribution of a single row with values `left` and `right`.
    #[inline]
    fn of_row(left: Cell, right: Cell) -> PairCounts {
        let mut c = PairCounts::default();
        match (left.is_one(), right.is_one()) {
            (true, true) => c.one_one = 1,
            (true, false) => {
                c.one_zero = 1;
                c.one_zero_paid = u32::from(right == Cell::Zero);
            }
            (false, true) => {
                c.zero_one = 1;
                c.zero_one_paid = u32::from(left == Cell::Zero);
            }
            (false, false) => {}
        }
        c
    }

    #[inline]
    fn add(&mut self, other: PairCounts) {
        self.one_zero += other.one_zero;
        self.zero_one += other.zero_one;
        self.one_one += other.one_one;
        self.one_zero_paid += other.one_zero_paid;
        self.zero_one_paid += other.zero_one_paid;
    }

    #[inline]
    fn sub(&mut self, other: PairCounts) {
        self.one_zero -= other.one_zero;
        self.zero_one -= other.zero_one;
        self.one_one -= other.one_one;
        self.one_zero_paid -= other.one_zero_paid;
        self.zero_one_paid -= other.zero_one_paid;
    }

    /// Returns `true` if the pair shows all three gametes.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        self.one_zero > 0 && self.zero_one > 0 && self.one_one > 0
    }

    /// Minimum paid flips inside the pair's two columns that resolve it.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.one_zero_paid.min(self.zero_one_paid)
    }
}

/// A copy of the counters of `ConflictPairBound` together with the delta
/// they were computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCountSnapshot {
    applied: FlipDelta,
    counts: Vec<PairCounts>,
    extra: ExtraInfo,
}

impl PairCountSnapshot {
    /// Returns the delta the counters reflect.
    #[inline]
    pub fn applied(&self) -> &FlipDelta {
        &self.applied
    }

    /// Returns the number of flips in the captured delta.
    #[inline]
    pub fn num_flips(&self) -> usize {
        self.applied.len()
    }
}

#[inline(always)]
fn num_pairs(num_columns: usize) -> usize {
    num_columns * num_columns.saturating_sub(1) / 2
}

/// Index of the pair `(p, q)`, `p < q`, in the upper-triangular layout.
#[inline(always)]
fn pair_index(num_columns: usize, p: usize, q: usize) -> usize {
    debug_assert!(p < q && q < num_columns);
    p * (2 * num_columns - p - 1) / 2 + (q - p - 1)
}

/// Recomputes all counters of `matrix` with `delta` applied.
fn rebuild_counts(matrix: &Matrix, delta: &FlipDelta, counts: &mut Vec<PairCounts>) {
    let n = matrix.num_columns();
    counts.clear();
    counts.resize(num_pairs(n), PairCounts::default());

    let mut values = Vec::with_capacity(n);
    for r in 0..matrix.num_rows() {
        values.clear();
        values.extend((0..n).map(|c| matrix.value(Coord::new(r, c), delta)));
        for p in 0..n {
            for q in (p + 1)..n {
                if values[p].is_one() || values[q].is_one() {
                    counts[pair_index(n, p, q)].add(PairCounts::of_row(values[p], values[q]));
                }
            }
        }
    }
}

/// Moves one cell from `old` to `new` and patches every pair of its column.
fn update_cell(
    matrix: &Matrix,
    applied: &FlipDelta,
    counts: &mut [PairCounts],
    coord: Coord,
    old: Cell,
    new: Cell,
) {
    let n = matrix.num_columns();
    let c = coord.column.get();
    for d in 0..n {
        if d == c {
            continue;
        }
        let other = matrix.value(
            Coord {
                row: coord.row,
                column: ColumnIndex::new(d),
            },
            applied,
        );
        if c < d {
            let k = pair_index(n, c, d);
            counts[k].sub(PairCounts::of_row(old, other));
            counts[k].add(PairCounts::of_row(new, other));
        } else {
            let k = pair_index(n, d, c);
            counts[k].sub(PairCounts::of_row(other, old));
            counts[k].add(PairCounts::of_row(other, new));
        }
    }
}

/// Lower bound from column-disjoint conflicting column pairs.
///
/// Supports missing entries: a missing cell flipped to 1 is free, and the
/// counters distinguish free from paid flips.
#[derive(Debug, Clone)]
pub struct ConflictPairBound<T> {
    matrix: Option<Matrix>,
    applied: FlipDelta,
    counts: Vec<PairCounts>,
    extra: ExtraInfo,
    times: Timings,
    candidates: Vec<(u32, usize, usize)>,
    used: Vec<bool>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for ConflictPairBound<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConflictPairBound<T> {
    /// Creates an unbound `ConflictPairBound`.
    #[inline]
    pub fn new() -> Self {
        Self {
            matrix: None,
            applied: FlipDelta::new(),
            counts: Vec::new(),
            extra: ExtraInfo::EMPTY,
            times: Timings::new(),
            candidates: Vec::new(),
            used: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Brings the counters from the applied delta to `delta`.
    fn sync(&mut self, delta: &FlipDelta) {
        let Some(matrix) = self.matrix.as_ref() else {
            return;
        };

        let removed: Vec<Coord> = self.applied.difference(delta).collect();
        let added: Vec<Coord> = delta.difference(&self.applied).collect();
        if removed.is_empty() && added.is_empty() {
            return;
        }

        if removed.len() + added.len() > matrix.num_rows().max(1) {
            log::trace!(
                "ConflictPairBound: rebuilding counters ({} removed, {} added)",
                removed.len(),
                added.len()
            );
            rebuild_counts(matrix, delta, &mut self.counts);
            self.applied = delta.clone();
            return;
        }

        for coord in removed {
            let original = matrix.get(coord.row, coord.column);
            update_cell(matrix, &self.applied, &mut self.counts, coord, Cell::One, original);
            self.applied.remove(coord);
        }
        for coord in added {
            let original = matrix.get(coord.row, coord.column);
            update_cell(matrix, &self.applied, &mut self.counts, coord, original, Cell::One);
            self.applied.insert(coord);
        }
    }

    /// Scans the counters, refreshes the diagnostics and returns the summed
    /// cost of a greedy column-disjoint set of conflicting pairs.
    fn evaluate(&mut self, num_columns: usize) -> usize {
        let n = num_columns;
        self.candidates.clear();
        let mut conflicting = 0usize;
        let mut violating: Option<(u32, usize, usize)> = None;

        for p in 0..n {
            for q in (p + 1)..n {
                let counts = &self.counts[pair_index(n, p, q)];
                if !counts.is_conflict() {
                    continue;
                }
                conflicting += 1;
                let cost = counts.cost();
                if violating.is_none_or(|(best, _, _)| cost > best) {
                    violating = Some((cost, p, q));
                }
                if cost > 0 {
                    self.candidates.push((cost, p, q));
                }
            }
        }

        self.candidates
            .sort_unstable_by(|a, b| b.0.cmp(&a.0).then((a.1, a.2).cmp(&(b.1, b.2))));
        self.used.clear();
        self.used.resize(n, false);

        let mut total = 0usize;
        for &(cost, p, q) in &self.candidates {
            if self.used[p] || self.used[q] {
                continue;
            }
            self.used[p] = true;
            self.used[q] = true;
            total += cost as usize;
        }

        self.extra = ExtraInfo {
            is_conflict_free: Some(conflicting == 0),
            violating_pair: violating.map(|(_, p, q)| (ColumnIndex::new(p), ColumnIndex::new(q))),
            conflicting_pairs: Some(conflicting),
        };
        total
    }
}

impl<T> BoundingAlgorithm<T> for ConflictPairBound<T>
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

        self.applied.clear();
        self.extra = ExtraInfo::EMPTY;
        rebuild_counts(matrix, &self.applied, &mut self.counts);
        self.matrix = Some(matrix.clone());

        log::trace!(
            "ConflictPairBound: reset on {:?} with {} column pairs",
            matrix,
            self.counts.len()
        );
        self.times.record(PHASE_RESET, start.elapsed());
        Ok(())
    }

    fn bound(&mut self, delta: &FlipDelta) -> Result<T, BoundError> {
        let start = Instant::now();
        let (paid, num_columns) = {
            let matrix = self
                .matrix
                .as_ref()
                .ok_or_else(|| BoundError::not_reset("ConflictPairBound"))?;
            matrix.check_delta(delta)?;
            (matrix.flip_cost(delta), matrix.num_columns())
        };

        self.sync(delta);
        let remaining = self.evaluate(num_columns);

        self.times.record(PHASE_BOUND, start.elapsed());
        Ok(T::from_count(paid.saturating_add(remaining)))
    }

    fn state(&self) -> AlgorithmState {
        if self.matrix.is_none() {
            return AlgorithmState::NoState;
        }
        AlgorithmState::PairCounts(Box::new(PairCountSnapshot {
            applied: self.applied.clone(),
            counts: self.counts.clone(),
            extra: self.extra,
        }))
    }

    fn set_state(&mut self, state: AlgorithmState) -> Result<(), BoundError> {
        let name = "ConflictPairBound";
        match state {
            AlgorithmState::NoState if self.matrix.is_none() => Ok(()),
            AlgorithmState::PairCounts(snapshot) => {
                let matrix = self
                    .matrix
                    .as_ref()
                    .ok_or_else(|| BoundError::not_reset(name))?;
                let expected = num_pairs(matrix.num_columns());
                if snapshot.counts.len() != expected {
                    return Err(BoundError::invalid_state(
                        name,
                        format!(
                            "snapshot holds {} column pairs, expected {}",
                            snapshot.counts.len(),
                            expected
                        ),
                    ));
                }
                if let Err(err) = matrix.check_delta(&snapshot.applied) {
                    return Err(BoundError::invalid_state(
                        name,
                        format!("snapshot does not fit the matrix: {}", err),
                    ));
                }

                let PairCountSnapshot {
                    applied,
                    counts,
                    extra,
                } = *snapshot;
                self.applied = applied;
                self.counts = counts;
                self.extra = extra;
                Ok(())
            }
            other => Err(BoundError::invalid_state(
                name,
                format!("expected PairCounts, got {}", other.kind()),
            )),
        }
    }

    #[inline]
    fn extra_info(&self) -> ExtraInfo {
        self.extra
    }

    #[inline]
    fn priority(&self, _till_here: T, _this_step: T, after_here: T, icf: bool) -> T {
        if icf { T::max_value() } else { -after_here }
    }

    fn times(&self) -> Timings {
        self.times.clone()
    }
}
