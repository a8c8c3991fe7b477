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

//! # Phyflip Model
//!
//! Data model for the minimum-flip perfect phylogeny problem: given a noisy
//! tri-state genotype matrix (rows are single cells, columns are mutations),
//! flip the fewest 0-entries to 1 so that the result admits a perfect
//! phylogeny.
//!
//! ## Modules
//!
//! - `index`: phantom-tagged `RowIndex` / `ColumnIndex` and cell coordinates.
//! - `num`: the `FlipCount` numeric alias used for bounds and priorities.
//! - `matrix`: the validated tri-state `Matrix` and its error type.
//! - `delta`: `FlipDelta`, the sparse set of tentative flips.
//! - `conflict`: three-gamete conflict detection on a matrix plus delta.
//! - `loading`: SCS text loader and writer.

pub mod conflict;
pub mod delta;
pub mod index;
pub mod loading;
pub mod matrix;
pub mod num;
