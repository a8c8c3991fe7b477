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

//! Solver configuration.

/// The order in which open nodes are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeSelection {
    /// Expand the open node with the highest estimator priority next; ties
    /// go to the most recently created node.
    #[default]
    BestFirst,
    /// Dive along one branch at a time and restore estimator state from a
    /// trail when backtracking.
    DepthFirst,
}

impl std::fmt::Display for NodeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeSelection::BestFirst => write!(f, "BestFirst"),
            NodeSelection::DepthFirst => write!(f, "DepthFirst"),
        }
    }
}

/// Largest number of flippable cells on which the admissibility self-check runs.
pub const ADMISSIBILITY_CHECK_CELLS: usize = 8;

/// Configuration of a single `BnbSolver` run.
///
/// # Configuration
/// * `node_selection`: best-first or depth-first (default `BestFirst`).
/// * `initial_upper_bound`: only solutions strictly cheaper are accepted (default none).
/// * `check_admissibility`: verify the estimator against brute force on tiny
///   matrices before searching (default on in debug builds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BnbConfig<T> {
    pub node_selection: NodeSelection,
    pub initial_upper_bound: Option<T>,
    pub check_admissibility: bool,
}

impl<T> Default for BnbConfig<T> {
    fn default() -> Self {
        Self {
            node_selection: NodeSelection::default(),
            initial_upper_bound: None,
            check_admissibility: cfg!(debug_assertions),
        }
    }
}

impl<T> BnbConfig<T> {
    /// Creates the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node selection strategy.
    #[inline]
    pub fn with_node_selection(mut self, node_selection: NodeSelection) -> Self {
        self.node_selection = node_selection;
        self
    }

    /// Sets an upper bound known from elsewhere, e.g. a heuristic solution.
    #[inline]
    pub fn with_initial_upper_bound(mut self, bound: T) -> Self {
        self.initial_upper_bound = Some(bound);
        self
    }

    /// Enables or disables the admissibility self-check.
    #[inline]
    pub fn with_admissibility_check(mut self, yes: bool) -> Self {
        self.check_admissibility = yes;
        self
    }
}
