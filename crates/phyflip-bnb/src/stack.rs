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

//! Pending branches of depth-first search, grouped into one frame per open
//! node.

use phyflip_model::index::Coord;

/// A pending child: flip `coord`, paying `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Branch<T> {
    pub coord: Coord,
    pub step: T,
}

impl<T> Branch<T> {
    #[inline]
    pub fn new(coord: Coord, step: T) -> Self {
        Self { coord, step }
    }
}

impl<T> std::fmt::Display for Branch<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Branch(flip: {}, step: {})", self.coord, self.step)
    }
}

#[derive(Clone, Debug)]
pub struct SearchStack<T> {
    entries: Vec<Branch<T>>,
    frames: Vec<usize>,
}

impl<T> Default for SearchStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchStack<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Reserves room for a dive of `max_depth` flips with two children each.
    #[inline]
    pub fn ensure_capacity(&mut self, max_depth: usize) {
        let entry_capacity = max_depth.saturating_mul(2);
        self.entries
            .reserve(entry_capacity.saturating_sub(self.entries.len()));
        self.frames
            .reserve(max_depth.saturating_add(1).saturating_sub(self.frames.len()));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Closes the innermost frame and drops whatever it still holds.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        self.entries.truncate(start);
        Some(())
    }

    #[inline]
    pub fn push(&mut self, branch: Branch<T>) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchStack::push` without an open frame"
        );
        self.entries.push(branch);
    }

    /// Pops the next branch of the innermost frame, or `None` if the frame
    /// is exhausted.
    #[inline]
    pub fn pop(&mut self) -> Option<Branch<T>> {
        let start = *self.frames.last()?;
        if self.entries.len() > start {
            self.entries.pop()
        } else {
            None
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_respects_frames() {
        let mut stack = SearchStack::<i64>::new();
        stack.push_frame();
        stack.push(Branch::new(Coord::new(0, 0), 1));
        stack.push_frame();
        stack.push(Branch::new(Coord::new(1, 1), 0));

        assert_eq!(stack.pop(), Some(Branch::new(Coord::new(1, 1), 0)));
        assert_eq!(stack.pop(), None);

        stack.pop_frame();
        assert_eq!(stack.pop(), Some(Branch::new(Coord::new(0, 0), 1)));
    }

    #[test]
    fn test_pop_frame_discards_pending_branches() {
        let mut stack = SearchStack::<i64>::new();
        stack.push_frame();
        stack.push_frame();
        stack.push(Branch::new(Coord::new(2, 2), 1));
        stack.pop_frame();
        assert!(stack.entries.is_empty());
        assert_eq!(stack.frames.len(), 1);
        stack.pop_frame();
        assert!(stack.is_empty());
        assert!(stack.pop_frame().is_none());
    }
}
