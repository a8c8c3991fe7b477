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

//! # Phyflip BnB
//!
//! Branch-and-bound for minimum-flip perfect phylogeny reconstruction. The
//! crate centres on the `BoundingAlgorithm` contract: a stateful lower-bound
//! estimator bound to one matrix, queried for many partial flip sets, with
//! snapshot and restore of its incremental state so the driver can move
//! around the search tree without recomputing from scratch.
//!
//! Core flow
//! - Build a `phyflip_model::matrix::Matrix` (or load one from SCS text).
//! - Pick an estimator from `bound` (or by name through `bound::registry`).
//! - Run `bnb::BnbSolver`, optionally with a `config::BnbConfig` and monitors.
//! - Read the `result::BnbSolverOutcome` and apply its `FlipSolution`.
//!
//! Guarantees
//! - Estimators must be admissible; pruning relies on it for optimality.
//!   `bound::validation` checks this by brute force on small matrices.
//! - The search is deterministic for deterministic estimators.
//!
//! Module map
//! - `bound`: the estimator contract, built-in estimators, validation.
//! - `bnb`: the driver and its search session.
//! - `config`: node selection, warm start and self-check switches.
//! - `monitor`: tree-search monitors (log, composite, limits).
//! - `result`, `solution`, `stats`: what a run hands back.

pub mod bnb;
pub mod bound;
pub mod config;
pub mod error;
pub mod monitor;
mod queue;
pub mod result;
pub mod solution;
mod stack;
pub mod stats;
mod trail;

#[cfg(test)]
mod testing {
    use phyflip_model::matrix::Matrix;
    use rand::Rng;

    /// A random tri-state matrix; each cell is missing with `p_missing`,
    /// otherwise one with `p_one`.
    pub fn random_matrix<R>(rng: &mut R, rows: usize, cols: usize, p_one: f64, p_missing: f64) -> Matrix
    where
        R: Rng,
    {
        let codes: Vec<Vec<u8>> = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| {
                        if p_missing > 0.0 && rng.random_bool(p_missing) {
                            3
                        } else {
                            u8::from(rng.random_bool(p_one))
                        }
                    })
                    .collect()
            })
            .collect();
        Matrix::from_codes(&codes).unwrap()
    }
}
