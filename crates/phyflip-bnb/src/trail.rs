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

//! Undo trail for depth-first search.
//!
//! Every descent opens a frame that remembers the estimator snapshot and the
//! paid cost of the parent node. Flips applied inside the frame are logged so
//! that backtracking removes exactly those cells from the working delta and
//! hands the parent snapshot back to the driver.

use crate::bound::state::AlgorithmState;
use phyflip_model::{delta::FlipDelta, index::Coord};

/// A flip applied to the working delta.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrailEntry {
    coord: Coord,
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrailEntry(flip: {})", self.coord)
    }
}

/// The parent context restored when a frame is popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry<T> {
    state: AlgorithmState,
    previous_cost: T,
    entry_start_index: usize,
}

impl<T> std::fmt::Display for FrameEntry<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FrameEntry(state: {}, previous_cost: {}, entry_start_index: {})",
            self.state.kind(),
            self.previous_cost,
            self.entry_start_index
        )
    }
}

#[derive(Debug, Clone)]
pub struct SearchTrail<T> {
    entries: Vec<TrailEntry>,
    frames: Vec<FrameEntry<T>>,
}

impl<T> Default for SearchTrail<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchTrail<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Reserves room for a dive of `max_depth` flips.
    #[inline]
    pub fn ensure_capacity(&mut self, max_depth: usize) {
        self.entries
            .reserve(max_depth.saturating_sub(self.entries.len()));
        self.frames
            .reserve(max_depth.saturating_sub(self.frames.len()));
    }

    /// Opens a frame holding the parent's estimator snapshot and paid cost.
    #[inline]
    pub fn push_frame(&mut self, state: AlgorithmState, cost: T) {
        self.frames.push(FrameEntry {
            state,
            previous_cost: cost,
            entry_start_index: self.entries.len(),
        });
    }

    /// Flips `coord` in `delta` and logs it in the current frame.
    #[inline]
    pub fn apply_flip(&mut self, delta: &mut FlipDelta, coord: Coord) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::apply_flip` without an open frame"
        );

        if delta.insert(coord) {
            self.entries.push(TrailEntry { coord });
        }
    }

    /// Pops the innermost frame, removes its flips from `delta` and returns
    /// the parent snapshot and cost, or `None` if no frame is open.
    #[inline]
    pub fn backtrack(&mut self, delta: &mut FlipDelta) -> Option<(AlgorithmState, T)> {
        let frame = self.frames.pop()?;
        for entry in self.entries.drain(frame.entry_start_index..) {
            delta.remove(entry.coord);
        }
        Some((frame.state, frame.previous_cost))
    }

    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl<T> std::fmt::Display for SearchTrail<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(depth: {}, entries: {})",
            self.frames.len(),
            self.entries.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtrack_restores_delta_and_cost() {
        let mut trail = SearchTrail::<i64>::new();
        let mut delta = FlipDelta::new();

        trail.push_frame(AlgorithmState::NoState, 0);
        trail.apply_flip(&mut delta, Coord::new(0, 1));
        trail.push_frame(AlgorithmState::NoState, 1);
        trail.apply_flip(&mut delta, Coord::new(2, 0));
        assert_eq!(delta.len(), 2);
        assert_eq!(trail.frames.len(), 2);

        let (state, cost) = trail.backtrack(&mut delta).unwrap();
        assert!(state.is_none());
        assert_eq!(cost, 1);
        assert_eq!(delta.sorted(), vec![Coord::new(0, 1)]);

        let (_, cost) = trail.backtrack(&mut delta).unwrap();
        assert_eq!(cost, 0);
        assert!(delta.is_empty());
        assert!(trail.backtrack(&mut delta).is_none());
    }

    #[test]
    fn test_flip_already_in_delta_is_not_undone() {
        let mut trail = SearchTrail::<i64>::new();
        let mut delta: FlipDelta = [Coord::new(1, 1)].into_iter().collect();

        trail.push_frame(AlgorithmState::NoState, 0);
        trail.apply_flip(&mut delta, Coord::new(1, 1));
        assert!(trail.entries.is_empty());

        trail.backtrack(&mut delta);
        assert!(delta.contains(Coord::new(1, 1)));
    }

    #[test]
    fn test_reset_clears_frames() {
        let mut trail = SearchTrail::<i64>::default();
        let mut delta = FlipDelta::new();
        trail.push_frame(AlgorithmState::NoState, 0);
        trail.apply_flip(&mut delta, Coord::new(0, 0));
        trail.reset();
        assert!(trail.frames.is_empty());
        assert!(trail.entries.is_empty());
        assert_eq!(format!("{}", trail), "SearchTrail(depth: 0, entries: 0)");
    }
}
