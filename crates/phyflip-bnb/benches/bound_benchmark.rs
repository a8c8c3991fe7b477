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

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use phyflip_bnb::{
    bnb::BnbSolver,
    bound::{algorithm::BoundingAlgorithm, pairs::ConflictPairBound},
    config::{BnbConfig, NodeSelection},
    monitor::no_op::NoOperationMonitor,
};
use phyflip_model::{delta::FlipDelta, matrix::Matrix};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const SIZES: [(usize, usize); 3] = [(8, 6), (12, 8), (16, 10)];

fn random_matrix(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> Matrix {
    let codes: Vec<Vec<u8>> = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| {
                    if rng.random_bool(0.05) {
                        3
                    } else {
                        u8::from(rng.random_bool(0.4))
                    }
                })
                .collect()
        })
        .collect();
    Matrix::from_codes(&codes).expect("generated codes are valid")
}

/// A root bound after a full rebuild, then a walk of single-flip deltas that
/// exercises the incremental path.
fn bench_conflict_pair_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("conflict_pair_bound");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for (rows, cols) in SIZES {
        let matrix = random_matrix(&mut rng, rows, cols);
        let walk: Vec<FlipDelta> = matrix
            .flippable_cells()
            .scan(FlipDelta::new(), |delta, coord| {
                delta.insert(coord);
                Some(delta.clone())
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", rows, cols)),
            &matrix,
            |b, matrix| {
                let mut estimator = ConflictPairBound::<i64>::new();
                b.iter(|| {
                    estimator.reset(matrix).expect("reset succeeds");
                    for delta in &walk {
                        black_box(estimator.bound(delta).expect("bound succeeds"));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_solver");
    group.sample_size(20);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let matrix = random_matrix(&mut rng, 10, 6);

    for mode in [NodeSelection::BestFirst, NodeSelection::DepthFirst] {
        let config = BnbConfig::<i64>::new()
            .with_node_selection(mode)
            .with_admissibility_check(false);
        group.bench_function(BenchmarkId::from_parameter(mode), |b| {
            let mut solver = BnbSolver::<i64>::new();
            b.iter(|| {
                let mut estimator = ConflictPairBound::<i64>::new();
                let outcome = solver
                    .solve_with_config(
                        black_box(&matrix),
                        &mut estimator,
                        NoOperationMonitor::new(),
                        &config,
                    )
                    .expect("search succeeds");
                black_box(outcome.solution().map(|s| s.cost()));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_conflict_pair_bound, bench_solver);
criterion_main!(benches);
