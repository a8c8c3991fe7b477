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

//! Branch-and-bound driver
//!
//! `BnbSolver` searches for a minimum-cost set of flips that makes a matrix
//! conflict-free. Each node is a `FlipDelta`; a node with a conflict on
//! columns `(p, q)` and witness rows `r10`, `r01` splits into the children
//! that flip `(r10, q)` and `(r01, p)`, since every solution flips one of the
//! two. A pluggable `BoundingAlgorithm` supplies the lower bounds used for
//! pruning, the node priorities of best-first search, and the state
//! snapshots restored on backtracking.
//!
//! Two node selection strategies are available:
//! - `BestFirst`: a max-heap frontier on the estimator priority. Each node
//!   carries the snapshot taken after its bound call and reinstalls it before
//!   its children are bounded.
//! - `DepthFirst`: a frame stack of pending branches plus an undo trail that
//!   restores the working delta, the paid cost and the estimator snapshot on
//!   backtrack.
//!
//! Monitors observe every step and may stop the search, in which case the
//! best solution found so far is reported as feasible.

use crate::{
    bound::{algorithm::BoundingAlgorithm, state::AlgorithmState, validation},
    config::{ADMISSIBILITY_CHECK_CELLS, BnbConfig, NodeSelection},
    error::BnbError,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    queue::{NodeQueue, SearchNode},
    result::BnbSolverOutcome,
    solution::FlipSolution,
    stack::{Branch, SearchStack},
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use phyflip_model::{
    conflict::{ColumnSets, Conflict},
    delta::FlipDelta,
    index::Coord,
    matrix::Matrix,
    num::FlipCount,
};
use smallvec::SmallVec;
use std::time::Instant;

/// A branch-and-bound solver for the minimum-flip problem.
///
/// The solver owns its search buffers and can be reused across runs.
#[derive(Debug)]
pub struct BnbSolver<T> {
    trail: SearchTrail<T>,
    stack: SearchStack<T>,
    queue: NodeQueue<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: FlipCount,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: FlipCount,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
            queue: NodeQueue::new(),
        }
    }

    /// Solves `matrix` with the default configuration.
    pub fn solve<E, S>(
        &mut self,
        matrix: &Matrix,
        estimator: &mut E,
        monitor: S,
    ) -> Result<BnbSolverOutcome<T>, BnbError>
    where
        E: BoundingAlgorithm<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        self.solve_with_config(matrix, estimator, monitor, &BnbConfig::default())
    }

    /// Solves `matrix` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::MissingValuesUnsupported` if `matrix` has missing
    /// entries the estimator cannot handle, `BnbError::NotAdmissible` if the
    /// enabled self-check catches an overestimate, and propagates every
    /// estimator failure.
    pub fn solve_with_config<E, S>(
        &mut self,
        matrix: &Matrix,
        estimator: &mut E,
        mut monitor: S,
        config: &BnbConfig<T>,
    ) -> Result<BnbSolverOutcome<T>, BnbError>
    where
        E: BoundingAlgorithm<T> + ?Sized,
        S: TreeSearchMonitor<T>,
    {
        if matrix.has_missing() && !estimator.supports_missing() {
            return Err(BnbError::MissingValuesUnsupported {
                estimator: estimator.name().to_owned(),
                count: matrix.num_missing(),
            });
        }

        if config.check_admissibility
            && matrix.num_flippable() <= ADMISSIBILITY_CHECK_CELLS
            && !validation::is_admissible_exhaustive::<T, E>(estimator, matrix)?
        {
            return Err(BnbError::NotAdmissible {
                estimator: estimator.name().to_owned(),
            });
        }

        estimator.reset(matrix)?;
        let root = estimator
            .init_node()
            .map(|node| node.delta)
            .unwrap_or_default();
        matrix.check_delta(&root)?;

        log::debug!(
            "starting {} search on {}x{} matrix with {}",
            config.node_selection,
            matrix.num_rows(),
            matrix.num_columns(),
            estimator.name()
        );

        let session = BnbSolverSearchSession::new(
            self,
            matrix,
            estimator,
            &mut monitor,
            config.initial_upper_bound,
        );
        let res = match config.node_selection {
            NodeSelection::BestFirst => session.run_best_first(root),
            NodeSelection::DepthFirst => session.run_depth_first(root),
        };
        self.reset();
        res
    }

    /// Clears the search buffers without releasing their memory.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
        self.queue.clear();
    }
}

/// What the driver does with an evaluated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeStatus {
    Pruned,
    Solution,
    Branch(Conflict),
}

/// The state and logic of a single search run.
struct BnbSolverSearchSession<'a, T, E, S>
where
    T: FlipCount,
    E: ?Sized,
{
    solver: &'a mut BnbSolver<T>,
    matrix: &'a Matrix,
    estimator: &'a mut E,
    monitor: &'a mut S,
    best_cost: Option<T>,
    best_solution: Option<FlipSolution<T>>,
    stats: BnbSolverStatistics<T>,
    start_time: Instant,
}

impl<'a, T, E, S> BnbSolverSearchSession<'a, T, E, S>
where
    T: FlipCount,
    E: BoundingAlgorithm<T> + ?Sized,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        matrix: &'a Matrix,
        estimator: &'a mut E,
        monitor: &'a mut S,
        initial_upper_bound: Option<T>,
    ) -> Self {
        Self {
            solver,
            matrix,
            estimator,
            monitor,
            best_cost: initial_upper_bound,
            best_solution: None,
            stats: BnbSolverStatistics::default(),
            start_time: Instant::now(),
        }
    }

    fn run_best_first(mut self, root: FlipDelta) -> Result<BnbSolverOutcome<T>, BnbError> {
        self.monitor.on_enter_search(self.matrix, &self.stats);

        let cost = T::from_count(self.matrix.flip_cost(&root));
        self.stats.on_node_explored();
        self.monitor.on_step(&root, &self.stats);
        let (bound, status) = self.evaluate(&root, cost)?;
        self.stats.set_root_lower_bound(bound);
        if let Some(node) = self.open_node(root, cost, bound, 0, status) {
            let priority =
                self.estimator
                    .priority(cost, T::zero(), bound, node.is_conflict_free());
            self.enqueue(node, priority);
        }

        let aborted = loop {
            if self.solver.queue.is_empty() {
                break None;
            }

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break Some(msg);
            }

            let Some(node) = self.solver.queue.pop() else {
                break None;
            };
            self.monitor.on_step(&node.delta, &self.stats);

            if self.is_dominated(node.bound) {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&node.delta, PruneReason::BoundDominated, &self.stats);
                continue;
            }

            match node.conflict {
                None => self.record_solution(&node.delta, node.cost),
                Some(conflict) => self.expand(node, conflict)?,
            }
        };

        Ok(self.finish(aborted))
    }

    /// Reinstalls the node's snapshot and bounds both children.
    fn expand(&mut self, node: SearchNode<T>, conflict: Conflict) -> Result<(), BnbError> {
        let SearchNode {
            delta,
            cost,
            depth,
            state,
            ..
        } = node;
        self.estimator.set_state(state)?;

        let children = self.children(&conflict);
        self.monitor
            .on_branch(&delta, &conflict, children.len(), &self.stats);

        for branch in children {
            let child_cost = cost.saturating_add(branch.step);
            let child_delta = delta.with(branch.coord);

            if self.is_dominated(child_cost) {
                self.stats.on_pruning_cost();
                self.monitor
                    .on_prune(&child_delta, PruneReason::CostDominated, &self.stats);
                continue;
            }

            let child_depth = depth.saturating_add(1);
            self.stats.on_node_explored();
            self.stats.on_depth_update(child_depth);
            let (child_bound, status) = self.evaluate(&child_delta, child_cost)?;

            if let Some(child) =
                self.open_node(child_delta, child_cost, child_bound, child_depth, status)
            {
                let priority = self.estimator.priority(
                    cost,
                    branch.step,
                    child_bound,
                    child.is_conflict_free(),
                );
                self.enqueue(child, priority);
            }
        }
        Ok(())
    }

    /// Turns an evaluated node into a frontier entry, or `None` if it was pruned.
    fn open_node(
        &self,
        delta: FlipDelta,
        cost: T,
        bound: T,
        depth: u64,
        status: NodeStatus,
    ) -> Option<SearchNode<T>> {
        let (conflict, state) = match status {
            NodeStatus::Pruned => return None,
            NodeStatus::Solution => (None, AlgorithmState::NoState),
            NodeStatus::Branch(conflict) => (Some(conflict), self.estimator.state()),
        };
        Some(SearchNode {
            delta,
            cost,
            bound,
            depth,
            state,
            conflict,
        })
    }

    #[inline]
    fn enqueue(&mut self, node: SearchNode<T>, priority: T) {
        self.solver.queue.push(node, priority);
        self.stats.on_node_enqueued();
        self.stats
            .on_frontier_update(self.solver.queue.len() as u64);
    }

    fn run_depth_first(mut self, root: FlipDelta) -> Result<BnbSolverOutcome<T>, BnbError> {
        self.monitor.on_enter_search(self.matrix, &self.stats);

        let max_depth = self.matrix.num_flippable();
        self.solver.trail.ensure_capacity(max_depth);
        self.solver.stack.ensure_capacity(max_depth);

        let mut delta = root;
        let mut cost = T::from_count(self.matrix.flip_cost(&delta));
        let mut depth: u64 = 0;

        self.stats.on_node_explored();
        self.monitor.on_step(&delta, &self.stats);
        let (bound, status) = self.evaluate(&delta, cost)?;
        self.stats.set_root_lower_bound(bound);
        match status {
            NodeStatus::Pruned => {}
            NodeStatus::Solution => self.record_solution(&delta, cost),
            NodeStatus::Branch(conflict) => self.push_branches(&delta, &conflict),
        }

        let aborted = loop {
            if self.solver.stack.is_empty() {
                break None;
            }

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break Some(msg);
            }

            let Some(branch) = self.solver.stack.pop() else {
                // Every frame but the root's was opened by a descent.
                self.solver.stack.pop_frame();
                if !self.solver.stack.is_empty() {
                    self.backtrack(&mut delta, &mut cost, &mut depth)?;
                }
                continue;
            };

            let child_cost = cost.saturating_add(branch.step);
            if self.is_dominated(child_cost) {
                self.stats.on_pruning_cost();
                delta.insert(branch.coord);
                self.monitor
                    .on_prune(&delta, PruneReason::CostDominated, &self.stats);
                delta.remove(branch.coord);
                continue;
            }

            let snapshot = self.estimator.state();
            self.solver.trail.push_frame(snapshot, cost);
            self.solver.trail.apply_flip(&mut delta, branch.coord);
            cost = child_cost;
            depth = depth.saturating_add(1);

            self.stats.on_node_explored();
            self.stats.on_depth_update(depth);
            self.monitor.on_step(&delta, &self.stats);

            let (_, status) = self.evaluate(&delta, cost)?;
            match status {
                NodeStatus::Branch(conflict) => self.push_branches(&delta, &conflict),
                NodeStatus::Solution => {
                    self.record_solution(&delta, cost);
                    self.backtrack(&mut delta, &mut cost, &mut depth)?;
                }
                NodeStatus::Pruned => self.backtrack(&mut delta, &mut cost, &mut depth)?,
            }
        };

        Ok(self.finish(aborted))
    }

    /// Opens a stack frame holding the node's children, cheapest on top.
    fn push_branches(&mut self, delta: &FlipDelta, conflict: &Conflict) {
        let children = self.children(conflict);
        self.monitor
            .on_branch(delta, conflict, children.len(), &self.stats);

        self.solver.stack.push_frame();
        for branch in children.into_iter().rev() {
            self.solver.stack.push(branch);
        }
    }

    /// Undoes the innermost descent and reinstalls the parent snapshot.
    fn backtrack(
        &mut self,
        delta: &mut FlipDelta,
        cost: &mut T,
        depth: &mut u64,
    ) -> Result<(), BnbError> {
        if let Some((state, previous_cost)) = self.solver.trail.backtrack(delta) {
            self.estimator.set_state(state)?;
            *cost = previous_cost;
            *depth = depth.saturating_sub(1);
            self.stats.on_backtrack();
            self.monitor.on_backtrack(delta, &self.stats);
        }
        Ok(())
    }

    /// Bounds `delta` and decides whether to prune, accept or branch.
    fn evaluate(&mut self, delta: &FlipDelta, cost: T) -> Result<(T, NodeStatus), BnbError> {
        let bound = self.estimator.bound(delta)?;
        self.stats.on_bound_call();
        let extra = self.estimator.extra_info();
        self.monitor
            .on_bound_computed(delta, bound, &extra, &self.stats);

        if self.is_dominated(bound) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(delta, PruneReason::BoundDominated, &self.stats);
            return Ok((bound, NodeStatus::Pruned));
        }

        if extra.icf() {
            return Ok((bound, NodeStatus::Solution));
        }

        let sets = ColumnSets::new(self.matrix, delta);
        let conflict = extra
            .violating_pair
            .and_then(|(left, right)| sets.conflict_between(left, right))
            .or_else(|| sets.first_conflict());

        let status = match conflict {
            Some(conflict) => NodeStatus::Branch(conflict),
            None if self.is_dominated(cost) => {
                self.stats.on_pruning_cost();
                self.monitor
                    .on_prune(delta, PruneReason::CostDominated, &self.stats);
                NodeStatus::Pruned
            }
            None => NodeStatus::Solution,
        };
        Ok((bound, status))
    }

    /// The two ways of resolving `conflict`, cheapest first.
    fn children(&self, conflict: &Conflict) -> SmallVec<[Branch<T>; 2]> {
        let mut children: SmallVec<[Branch<T>; 2]> = [
            Coord {
                row: conflict.row_one_zero,
                column: conflict.right,
            },
            Coord {
                row: conflict.row_zero_one,
                column: conflict.left,
            },
        ]
        .into_iter()
        .map(|coord| {
            let step = self.matrix.get(coord.row, coord.column).flip_cost();
            Branch::new(coord, T::from_count(step))
        })
        .collect();
        children.sort_by_key(|branch| branch.step);
        children
    }

    #[inline]
    fn is_dominated(&self, value: T) -> bool {
        self.best_cost.is_some_and(|best| value >= best)
    }

    fn record_solution(&mut self, delta: &FlipDelta, cost: T) {
        if self.is_dominated(cost) {
            return;
        }

        debug_assert!(
            phyflip_model::conflict::is_conflict_free(self.matrix, delta),
            "recorded a solution that still has conflicts: {}",
            delta
        );

        log::debug!(
            "incumbent improved to {} ({} flips) after {} nodes",
            cost,
            delta.len(),
            self.stats.nodes_explored
        );

        let solution = FlipSolution::new(delta.clone(), cost);
        self.best_cost = Some(cost);
        self.stats.on_solution_found();
        self.monitor.on_solution_found(&solution, &self.stats);
        self.best_solution = Some(solution);
    }

    fn finish(mut self, aborted: Option<String>) -> BnbSolverOutcome<T> {
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        log::debug!(
            "search finished after {} nodes in {:.2?}",
            self.stats.nodes_explored,
            self.stats.time_total
        );

        match (aborted, self.best_solution) {
            (Some(msg), solution) => BnbSolverOutcome::aborted(solution, msg, self.stats),
            (None, Some(solution)) => BnbSolverOutcome::optimal(solution, self.stats),
            (None, None) => BnbSolverOutcome::no_improvement(self.stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::{
            combined::MaxBound,
            error::BoundError,
            pairs::ConflictPairBound,
            validation::minimum_total_flips,
            zero::ZeroBound,
        },
        monitor::{
            log::LogTreeSearchMonitor, no_op::NoOperationMonitor, node_limit::NodeLimitMonitor,
        },
        result::{SolverResult, TerminationReason},
        testing::random_matrix,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::time::Duration;

    type I = i64;

    const MODES: [NodeSelection; 2] = [NodeSelection::BestFirst, NodeSelection::DepthFirst];

    fn config(mode: NodeSelection) -> BnbConfig<I> {
        BnbConfig::new()
            .with_node_selection(mode)
            .with_admissibility_check(false)
    }

    fn estimators() -> Vec<Box<dyn BoundingAlgorithm<I>>> {
        vec![
            Box::new(ZeroBound::<I>::new()),
            Box::new(ConflictPairBound::<I>::new()),
            Box::new(MaxBound::new(
                ZeroBound::<I>::new(),
                ConflictPairBound::<I>::new(),
            )),
        ]
    }

    /// Pays for the delta but refuses matrices with missing entries.
    struct PaidFlipsOnly {
        matrix: Option<Matrix>,
    }

    impl BoundingAlgorithm<I> for PaidFlipsOnly {
        fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
            crate::bound::algorithm::ensure_supported::<I, _>(self, matrix)?;
            self.matrix = Some(matrix.clone());
            Ok(())
        }

        fn bound(&mut self, delta: &FlipDelta) -> Result<I, BoundError> {
            let matrix = self
                .matrix
                .as_ref()
                .ok_or_else(|| BoundError::not_reset("PaidFlipsOnly"))?;
            Ok(matrix.flip_cost(delta) as I)
        }
    }

    /// Claims one more flip than is needed.
    struct Overestimate {
        matrix: Option<Matrix>,
    }

    impl BoundingAlgorithm<I> for Overestimate {
        fn supports_missing(&self) -> bool {
            true
        }

        fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
            self.matrix = Some(matrix.clone());
            Ok(())
        }

        fn bound(&mut self, delta: &FlipDelta) -> Result<I, BoundError> {
            let matrix = self
                .matrix
                .as_ref()
                .ok_or_else(|| BoundError::not_reset("Overestimate"))?;
            Ok(matrix.flip_cost(delta) as I + 1)
        }
    }

    /// Starts the search from a fixed flip.
    struct RootedZeroBound {
        inner: ZeroBound<I>,
        root: Coord,
    }

    impl BoundingAlgorithm<I> for RootedZeroBound {
        fn supports_missing(&self) -> bool {
            true
        }

        fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
            self.inner.reset(matrix)
        }

        fn bound(&mut self, delta: &FlipDelta) -> Result<I, BoundError> {
            self.inner.bound(delta)
        }

        fn init_node(&self) -> Option<crate::bound::algorithm::InitNode> {
            Some(crate::bound::algorithm::InitNode::new(
                [self.root].into_iter().collect(),
            ))
        }
    }

    /// Records the arguments of every `priority` call.
    struct RecordingPriority {
        inner: ConflictPairBound<I>,
        root: Option<Coord>,
        calls: RefCell<Vec<(I, I, I, bool)>>,
    }

    impl RecordingPriority {
        fn new(root: Option<Coord>) -> Self {
            Self {
                inner: ConflictPairBound::new(),
                root,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BoundingAlgorithm<I> for RecordingPriority {
        fn reset(&mut self, matrix: &Matrix) -> Result<(), BoundError> {
            self.inner.reset(matrix)
        }

        fn bound(&mut self, delta: &FlipDelta) -> Result<I, BoundError> {
            self.inner.bound(delta)
        }

        fn state(&self) -> AlgorithmState {
            self.inner.state()
        }

        fn set_state(&mut self, state: AlgorithmState) -> Result<(), BoundError> {
            self.inner.set_state(state)
        }

        fn extra_info(&self) -> crate::bound::extra::ExtraInfo {
            self.inner.extra_info()
        }

        fn priority(&self, till_here: I, this_step: I, after_here: I, icf: bool) -> I {
            self.calls
                .borrow_mut()
                .push((till_here, this_step, after_here, icf));
            self.inner.priority(till_here, this_step, after_here, icf)
        }

        fn init_node(&self) -> Option<crate::bound::algorithm::InitNode> {
            self.root.map(|coord| {
                crate::bound::algorithm::InitNode::new([coord].into_iter().collect())
            })
        }
    }

    #[test]
    fn test_priority_receives_paid_cost_and_step() {
        let m = Matrix::from_codes(&[[1u8, 0, 0], [0, 1, 0], [1, 1, 0]]).unwrap();
        let mut solver = BnbSolver::<I>::new();

        for (root, paid) in [(None, 0), (Some(Coord::new(0, 2)), 1)] {
            let mut estimator = RecordingPriority::new(root);
            let outcome = solver
                .solve_with_config(
                    &m,
                    &mut estimator,
                    NoOperationMonitor::new(),
                    &config(NodeSelection::BestFirst),
                )
                .unwrap();
            assert_eq!(outcome.solution().map(|s| s.cost()), Some(paid + 1));

            let calls = estimator.calls.into_inner();
            assert_eq!(calls.len(), 3, "root plus two children: {:?}", calls);
            let (till_here, this_step, _, icf) = calls[0];
            assert_eq!((till_here, this_step, icf), (paid, 0, false));
            for &(till_here, this_step, after_here, icf) in &calls[1..] {
                assert_eq!((till_here, this_step), (paid, 1));
                assert!(icf);
                assert_eq!(after_here, paid + 1);
            }
        }
    }

    #[test]
    fn test_single_conflict_needs_one_flip() {
        let m = Matrix::from_codes(&[[1u8, 0], [0, 1], [1, 1]]).unwrap();
        let mut solver = BnbSolver::<I>::new();

        for mode in MODES {
            for mut estimator in estimators() {
                let outcome = solver
                    .solve_with_config(&m, &mut estimator, NoOperationMonitor::new(), &config(mode))
                    .unwrap();
                assert!(outcome.is_optimal(), "{} / {}", mode, estimator.name());
                let solution = outcome.solution().unwrap();
                assert_eq!(solution.cost(), 1);
                assert!(solution.is_valid_for(&m));
            }
        }
    }

    #[test]
    fn test_conflict_free_matrix_needs_no_flips() {
        let m = Matrix::from_codes(&[[1u8, 0], [1, 1], [0, 0]]).unwrap();
        let mut solver = BnbSolver::<I>::new();
        for mode in MODES {
            let mut estimator = ConflictPairBound::<I>::new();
            let outcome = solver
                .solve_with_config(&m, &mut estimator, NoOperationMonitor::new(), &config(mode))
                .unwrap();
            let solution = outcome.solution().unwrap();
            assert_eq!(solution.cost(), 0);
            assert!(solution.flips().is_empty());
            assert_eq!(outcome.statistics().nodes_explored, 1);
        }
    }

    #[test]
    fn test_optimum_matches_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut solver = BnbSolver::<I>::new();

        for _ in 0..30 {
            let m = random_matrix(&mut rng, 5, 4, 0.55, 0.1);
            let Some(expected) = minimum_total_flips(&m, &FlipDelta::new()) else {
                continue;
            };

            for mode in MODES {
                for mut estimator in estimators() {
                    let outcome = solver
                        .solve_with_config(
                            &m,
                            &mut estimator,
                            NoOperationMonitor::new(),
                            &config(mode),
                        )
                        .unwrap();
                    let solution = outcome.solution().unwrap();
                    assert_eq!(
                        solution.cost(),
                        expected as I,
                        "{} / {} on\n{}",
                        mode,
                        estimator.name(),
                        m
                    );
                    assert!(solution.is_valid_for(&m));
                    assert!(outcome.statistics().root_lower_bound <= expected as I);
                }
            }
        }
    }

    #[test]
    fn test_missing_cells_are_free_to_flip() {
        let m = Matrix::from_codes(&[[1u8, 3], [0, 1], [1, 1]]).unwrap();
        let mut solver = BnbSolver::<I>::new();
        for mode in MODES {
            let mut estimator = ConflictPairBound::<I>::new();
            let outcome = solver
                .solve_with_config(&m, &mut estimator, NoOperationMonitor::new(), &config(mode))
                .unwrap();
            assert_eq!(outcome.solution().map(|s| s.cost()), Some(0));
        }
    }

    #[test]
    fn test_missing_values_need_supporting_estimator() {
        let m = Matrix::from_codes(&[[1u8, 3], [0, 1]]).unwrap();
        let mut solver = BnbSolver::<I>::new();
        let mut estimator = PaidFlipsOnly { matrix: None };
        let err = solver
            .solve(&m, &mut estimator, NoOperationMonitor::new())
            .unwrap_err();
        assert_eq!(
            err,
            BnbError::MissingValuesUnsupported {
                estimator: "PaidFlipsOnly".to_owned(),
                count: 1
            }
        );
    }

    #[test]
    fn test_overestimate_is_rejected_by_self_check() {
        let m = Matrix::from_codes(&[[1u8, 0], [0, 1], [1, 1]]).unwrap();
        let mut solver = BnbSolver::<I>::new();
        let mut estimator = Overestimate { matrix: None };
        let cfg = BnbConfig::new().with_admissibility_check(true);
        let err = solver
            .solve_with_config(&m, &mut estimator, NoOperationMonitor::new(), &cfg)
            .unwrap_err();
        assert!(matches!(err, BnbError::NotAdmissible { .. }));
    }

    #[test]
    fn test_node_limit_aborts_search() {
        let m = Matrix::from_codes(&[[1u8, 0, 1, 0], [0, 1, 0, 1], [1, 1, 1, 1], [1, 0, 0, 1]])
            .unwrap();
        let mut solver = BnbSolver::<I>::new();

        for mode in MODES {
            let mut estimator = ZeroBound::<I>::new();
            let outcome = solver
                .solve_with_config(&m, &mut estimator, NodeLimitMonitor::new(1), &config(mode))
                .unwrap();
            assert_eq!(
                outcome.termination_reason(),
                &TerminationReason::Aborted("Node limit of 1 nodes reached".to_owned())
            );
            assert_eq!(outcome.result(), &SolverResult::Unknown);
            assert_eq!(outcome.statistics().nodes_explored, 1);
        }
    }

    #[test]
    fn test_upper_bound_at_optimum_yields_no_improvement() {
        let m = Matrix::from_codes(&[[1u8, 0], [0, 1], [1, 1]]).unwrap();
        let mut solver = BnbSolver::<I>::new();
        for mode in MODES {
            let mut estimator = ConflictPairBound::<I>::new();
            let cfg = config(mode).with_initial_upper_bound(1);
            let outcome = solver
                .solve_with_config(&m, &mut estimator, NoOperationMonitor::new(), &cfg)
                .unwrap();
            assert_eq!(outcome.termination_reason(), &TerminationReason::NoImprovement);
            assert_eq!(outcome.result(), &SolverResult::Unknown);
            assert!(outcome.statistics().prunings() > 0);
        }
    }

    #[test]
    fn test_init_node_is_kept_in_solution() {
        let m = Matrix::from_codes(&[[1u8, 0, 0], [0, 1, 0], [1, 1, 0]]).unwrap();
        let root = Coord::new(0, 2);
        let mut solver = BnbSolver::<I>::new();
        for mode in MODES {
            let mut estimator = RootedZeroBound {
                inner: ZeroBound::new(),
                root,
            };
            let outcome = solver
                .solve_with_config(&m, &mut estimator, NoOperationMonitor::new(), &config(mode))
                .unwrap();
            let solution = outcome.solution().unwrap();
            assert!(solution.flips().contains(root));
            assert_eq!(solution.cost(), 2);
        }
    }

    #[test]
    fn test_estimator_state_survives_depth_first_backtracking() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let mut solver = BnbSolver::<I>::new();
        for _ in 0..10 {
            let m = random_matrix(&mut rng, 6, 5, 0.5, 0.15);
            let mut best_first = ConflictPairBound::<I>::new();
            let mut depth_first = ConflictPairBound::<I>::new();
            let a = solver
                .solve_with_config(
                    &m,
                    &mut best_first,
                    NoOperationMonitor::new(),
                    &config(NodeSelection::BestFirst),
                )
                .unwrap();
            let b = solver
                .solve_with_config(
                    &m,
                    &mut depth_first,
                    NoOperationMonitor::new(),
                    &config(NodeSelection::DepthFirst),
                )
                .unwrap();
            assert_eq!(
                a.solution().map(|s| s.cost()),
                b.solution().map(|s| s.cost())
            );
            assert!(b.statistics().backtracks > 0 || b.statistics().nodes_explored == 1);
        }
    }

    #[test]
    fn test_log_monitor_runs_through_search() {
        let _ = env_logger::builder().is_test(true).try_init();
        let m = Matrix::from_codes(&[[1u8, 0, 1], [0, 1, 1], [1, 1, 0], [0, 0, 1]]).unwrap();
        let mut solver = BnbSolver::<I>::new();
        let mut estimator = ConflictPairBound::<I>::new();
        let monitor = LogTreeSearchMonitor::<I>::new(Duration::ZERO, 0);
        let outcome = solver
            .solve_with_config(
                &m,
                &mut estimator,
                monitor,
                &config(NodeSelection::BestFirst),
            )
            .unwrap();
        assert!(outcome.is_optimal());
        assert_eq!(
            outcome.solution().map(|s| s.cost() as usize),
            minimum_total_flips(&m, &FlipDelta::new())
        );
        assert_eq!(outcome.solution().map(|s| s.cost()), Some(2));
    }
}
