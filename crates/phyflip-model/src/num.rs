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

//! # Flip Count Numeric Trait
//!
//! Unified numeric bounds for bound values, costs and priorities. Bounds are
//! integer flip counts; priorities are negated bounds, so the type must be
//! signed. `FlipCount` collects the required `num_traits` bounds into a single
//! alias so that estimators and the driver stay generic over `i32`, `i64` and
//! friends without repeating long where-clauses.

use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for numeric types that can hold flip counts, bounds and
/// priorities. These are usually the signed integer types `i16`, `i32`, `i64`
/// and `isize`.
pub trait FlipCount:
    PrimInt + Signed + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + Hash + 'static
{
    /// Converts a cell count into `Self`, saturating at `Self::max_value()`.
    #[inline]
    fn from_count(count: usize) -> Self {
        Self::from_usize(count).unwrap_or_else(Self::max_value)
    }
}

impl<T> FlipCount for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::FlipCount;

    #[test]
    fn test_from_count_converts_small_values() {
        assert_eq!(<i64 as FlipCount>::from_count(17), 17);
        assert_eq!(<i32 as FlipCount>::from_count(0), 0);
    }

    #[test]
    fn test_from_count_saturates() {
        assert_eq!(<i8 as FlipCount>::from_count(1_000), i8::MAX);
    }
}
