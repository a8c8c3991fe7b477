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

//! Validation utilities for bounding algorithms. This module provides a small
//! brute-force harness for checking that a `BoundingAlgorithm` is admissible,
//! i.e. that its bound never exceeds the true minimum number of paid flips of
//! any conflict-free completion.
//!
//! The ground truth comes from enumerating every subset of the still
//! flippable cells, which is exponential in their number. The routines are
//! therefore guarded by cell limits and meant for diagnostics during
//! development and testing: the driver runs the admissibility check as a
//! debug assertion on tiny matrices, and the tests use it on random ones.

use crate::bound::{algorithm::BoundingAlgorithm, error::BoundError};
use phyflip_model::{
    conflict::ColumnSets, delta::FlipDelta, index::Coord, matrix::Matrix, num::FlipCount,
};

/// Maximum number of free cells `minimum_total_flips` enumerates.
pub const MAX_EXHAUSTIVE_CELLS: usize = 20;

/// Maximum number of flippable cells `is_admissible_exhaustive` accepts.
pub const MAX_ADMISSIBILITY_CELLS: usize = 10;

/// Returns the minimum number of paid flips, `delta` included, over all
/// conflict-free completions of `delta`.
///
/// Returns `None` if more than `MAX_EXHAUSTIVE_CELLS` cells are still free.
/// A completion always exists, since flipping every free cell yields columns
/// of all ones.
pub fn minimum_total_flips(matrix: &Matrix, delta: &FlipDelta) -> Option<usize> {
    let free: Vec<Coord> = matrix
        .flippable_cells()
        .filter(|c| !delta.contains(*c))
        .collect();
    if free.len() > MAX_EXHAUSTIVE_CELLS {
        return None;
    }

    let costs: Vec<usize> = free
        .iter()
        .map(|c| matrix.get(c.row, c.column).flip_cost())
        .collect();
    let base = matrix.flip_cost(delta);
    let mut best = usize::MAX;

    for mask in 0u64..(1u64 << free.len()) {
        let extra: usize = (0..free.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| costs[i])
            .sum();
        let total = base + extra;
        if total >= best {
            continue;
        }

        let mut candidate = delta.clone();
        candidate.extend(
            (0..free.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| free[i]),
        );
        if ColumnSets::new(matrix, &candidate).first_conflict().is_none() {
            best = total;
        }
    }
    Some(best)
}

/// Checks whether an estimator is admissible on `matrix` by querying it on
/// every subset of the flippable cells and comparing with the brute-force
/// optimum of that subproblem.
///
/// The estimator is reset on `matrix` first. Returns `Ok(false)` at the first
/// delta whose bound exceeds the optimum and `Ok(true)` when none does.
/// Matrices with more than `MAX_ADMISSIBILITY_CELLS` flippable cells are not
/// examined and reported as admissible.
pub fn is_admissible_exhaustive<T, E>(estimator: &mut E, matrix: &Matrix) -> Result<bool, BoundError>
where
    T: FlipCount,
    E: BoundingAlgorithm<T> + ?Sized,
{
    let cells: Vec<Coord> = matrix.flippable_cells().collect();
    if cells.len() > MAX_ADMISSIBILITY_CELLS {
        log::debug!(
            "admissibility check skipped for {}: {} flippable cells",
            estimator.name(),
            cells.len()
        );
        return Ok(true);
    }

    estimator.reset(matrix)?;
    for mask in 0u64..(1u64 << cells.len()) {
        let delta: FlipDelta = (0..cells.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| cells[i])
            .collect();
        let bound = estimator.bound(&delta)?;
        let Some(optimum) = minimum_total_flips(matrix, &delta) else {
            continue;
        };
        if bound > T::from_count(optimum) {
            log::warn!(
                "{} is not admissible: bound {} exceeds optimum {} at {}",
                estimator.name(),
                bound,
                optimum,
                delta
            );
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::{
            algorithm::ensure_supported, combined::MaxBound, pairs::ConflictPairBound,
            zero::ZeroBound,
        },
        testing::random_matrix,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Claims one flip too many on every node.
    struct Overestimate {
        matrix: Option<Matrix>,
    }

    impl BoundingAlgorithm<i64> for Overestimate {
        fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
            ensure_supported::<i64, _>(self, matrix)?;
            self.matrix = Some(matrix.clone());
            Ok(())
        }

        fn bound(&mut self, delta: &FlipDelta) -> Result<i64, BoundError> {
            let matrix = self
                .matrix
                .as_ref()
                .ok_or_else(|| BoundError::not_reset("Overestimate"))?;
            Ok(matrix.flip_cost(delta) as i64 + 1)
        }
    }

    #[test]
    fn test_minimum_of_classic_conflict() {
        let m = Matrix::from_codes(&[[1u8, 0], [0, 1], [1, 1]]).unwrap();
        assert_eq!(minimum_total_flips(&m, &FlipDelta::new()), Some(1));
    }

    #[test]
    fn test_minimum_with_missing_is_free() {
        let m = Matrix::from_codes(&[[1u8, 3], [0, 1], [1, 1]]).unwrap();
        assert_eq!(minimum_total_flips(&m, &FlipDelta::new()), Some(0));
    }

    #[test]
    fn test_minimum_counts_delta_flips() {
        let m = Matrix::from_codes(&[[0u8, 1], [1, 0], [0, 0]]).unwrap();
        assert_eq!(minimum_total_flips(&m, &FlipDelta::new()), Some(0));
        // Row 2 becomes (1, 1) and the pair conflicts; one more flip resolves it.
        let delta: FlipDelta = [Coord::new(2, 0), Coord::new(2, 1)].into_iter().collect();
        assert_eq!(minimum_total_flips(&m, &delta), Some(3));
    }

    #[test]
    fn test_detects_overestimation() {
        let m = Matrix::from_codes(&[[0u8, 1], [1, 0]]).unwrap();
        let mut e = Overestimate { matrix: None };
        assert!(!is_admissible_exhaustive(&mut e, &m).unwrap());
    }

    #[test]
    fn test_builtin_estimators_are_admissible_on_random_matrices() {
        let mut rng = ChaCha8Rng::seed_from_u64(2025);
        let mut checked = 0;
        for _ in 0..60 {
            let m = random_matrix(&mut rng, 4, 4, 0.6, 0.1);
            if m.num_flippable() > MAX_ADMISSIBILITY_CELLS {
                continue;
            }
            checked += 1;
            assert!(is_admissible_exhaustive(&mut ZeroBound::<i64>::new(), &m).unwrap());
            assert!(
                is_admissible_exhaustive(&mut ConflictPairBound::<i64>::new(), &m).unwrap(),
                "ConflictPairBound not admissible on\n{}",
                m
            );
            let mut both = MaxBound::new(ZeroBound::<i64>::new(), ConflictPairBound::new());
            assert!(is_admissible_exhaustive(&mut both, &m).unwrap());
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_root_bound_never_exceeds_optimum_on_larger_matrices() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..25 {
            let m = random_matrix(&mut rng, 6, 6, 0.65, 0.1);
            if m.num_flippable() > 14 {
                continue;
            }
            let Some(optimum) = minimum_total_flips(&m, &FlipDelta::new()) else {
                continue;
            };
            let mut e = ConflictPairBound::<i64>::new();
            e.reset(&m).unwrap();
            let bound = e.bound(&FlipDelta::new()).unwrap();
            assert!(bound <= optimum as i64, "bound {} > optimum {}", bound, optimum);
        }
    }

    #[test]
    fn test_bound_is_monotone_along_optimal_path() {
        use crate::{bnb::BnbSolver, config::BnbConfig, monitor::no_op::NoOperationMonitor};

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut solver = BnbSolver::<i64>::new();
        for _ in 0..15 {
            let m = random_matrix(&mut rng, 5, 4, 0.55, 0.1);
            let Some(optimum) = minimum_total_flips(&m, &FlipDelta::new()) else {
                continue;
            };

            let mut e = ConflictPairBound::<i64>::new();
            let outcome = solver
                .solve_with_config(
                    &m,
                    &mut e,
                    NoOperationMonitor::new(),
                    &BnbConfig::new().with_admissibility_check(false),
                )
                .unwrap();
            let path = outcome.solution().unwrap().flips().sorted();

            e.reset(&m).unwrap();
            let mut delta = FlipDelta::new();
            let mut last_remaining = optimum;
            for step in std::iter::once(None).chain(path.into_iter().map(Some)) {
                if let Some(coord) = step {
                    delta.insert(coord);
                }
                let bound = e.bound(&delta).unwrap();
                let paid = m.flip_cost(&delta);
                let remaining = minimum_total_flips(&m, &delta).unwrap() - paid;

                assert!(bound <= optimum as i64);
                assert!(bound - paid as i64 <= remaining as i64);
                assert!(remaining <= last_remaining);
                last_remaining = remaining;
            }
            assert_eq!(last_remaining, 0);
            assert_eq!(e.bound(&delta).unwrap(), optimum as i64);
        }
    }
}
