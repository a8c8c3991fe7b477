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

//! Frontier of best-first search.

use crate::bound::state::AlgorithmState;
use phyflip_model::{conflict::Conflict, delta::FlipDelta};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An evaluated but not yet expanded node.
#[derive(Debug, Clone)]
pub struct SearchNode<T> {
    /// Flips applied on the path from the root.
    pub delta: FlipDelta,
    /// Paid flips in `delta`.
    pub cost: T,
    /// The estimator's bound for `delta`.
    pub bound: T,
    /// Number of branching steps from the root.
    pub depth: u64,
    /// Estimator snapshot taken right after `bound` was computed.
    pub state: AlgorithmState,
    /// The conflict to branch on, or `None` if the node is conflict-free.
    pub conflict: Option<Conflict>,
}

impl<T> SearchNode<T> {
    /// Returns `true` if the node needs no further flips.
    #[inline]
    pub fn is_conflict_free(&self) -> bool {
        self.conflict.is_none()
    }
}

struct QueuedNode<T> {
    node: SearchNode<T>,
    priority: T,
    sequence: u64,
}

impl<T> PartialEq for QueuedNode<T>
where
    T: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueuedNode<T> where T: Ord {}

impl<T> PartialOrd for QueuedNode<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueuedNode<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher priority first, then the newest node.
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Max-heap of search nodes keyed by estimator priority.
pub struct NodeQueue<T> {
    heap: BinaryHeap<QueuedNode<T>>,
    next_sequence: u64,
}

impl<T> Default for NodeQueue<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeQueue<T>
where
    T: Ord,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Adds a node with the given priority.
    #[inline]
    pub fn push(&mut self, node: SearchNode<T>, priority: T) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.heap.push(QueuedNode {
            node,
            priority,
            sequence,
        });
    }

    /// Removes the node with the highest priority.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode<T>> {
        self.heap.pop().map(|q| q.node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}

impl<T> std::fmt::Debug for NodeQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeQueue")
            .field("len", &self.heap.len())
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(cost: i64) -> SearchNode<i64> {
        SearchNode {
            delta: FlipDelta::new(),
            cost,
            bound: cost,
            depth: 0,
            state: AlgorithmState::NoState,
            conflict: None,
        }
    }

    #[test]
    fn test_highest_priority_pops_first() {
        let mut q = NodeQueue::new();
        q.push(node(1), -5);
        q.push(node(2), -1);
        q.push(node(3), -3);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop().map(|n| n.cost), Some(2));
        assert_eq!(q.pop().map(|n| n.cost), Some(3));
        assert_eq!(q.pop().map(|n| n.cost), Some(1));
        assert!(q.pop().is_none());
    }

    #[test]
    fn test_ties_go_to_newest_node() {
        let mut q = NodeQueue::new();
        q.push(node(1), 0);
        q.push(node(2), 0);
        q.push(node(3), 0);
        assert_eq!(q.pop().map(|n| n.cost), Some(3));
        assert_eq!(q.pop().map(|n| n.cost), Some(2));
        q.clear();
        assert!(q.is_empty());
    }
}
