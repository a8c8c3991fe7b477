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

//! Diagnostics reported alongside a bound.
//!
//! `ExtraInfo` is a closed record instead of a free-form map. It is `Copy`, so
//! every read hands the caller an independent value and estimator internals
//! cannot be reached through it. Fields an estimator does not compute stay
//! `None`; the empty record is the default.

use phyflip_model::index::ColumnIndex;

/// Side-channel facts produced by the most recent `bound` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExtraInfo {
    /// Whether the matrix with the queried delta applied is already conflict-free.
    pub is_conflict_free: Option<bool>,
    /// A column pair that still violates the three-gamete rule.
    pub violating_pair: Option<(ColumnIndex, ColumnIndex)>,
    /// The number of violating column pairs.
    pub conflicting_pairs: Option<usize>,
}

impl ExtraInfo {
    /// The record with no facts.
    pub const EMPTY: ExtraInfo = ExtraInfo {
        is_conflict_free: None,
        violating_pair: None,
        conflicting_pairs: None,
    };

    /// Returns `true` if no field is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Returns `true` only if the estimator positively reported a conflict-free state.
    #[inline]
    pub fn icf(&self) -> bool {
        self.is_conflict_free == Some(true)
    }

    /// Combines two records, preferring the fields already set in `self`.
    #[inline]
    pub fn merge(self, other: ExtraInfo) -> ExtraInfo {
        ExtraInfo {
            is_conflict_free: self.is_conflict_free.or(other.is_conflict_free),
            violating_pair: self.violating_pair.or(other.violating_pair),
            conflicting_pairs: self.conflicting_pairs.or(other.conflicting_pairs),
        }
    }
}

impl std::fmt::Display for ExtraInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(icf) = self.is_conflict_free {
            parts.push(format!("icf: {}", icf));
        }
        if let Some((a, b)) = self.violating_pair {
            parts.push(format!("violating_pair: ({}, {})", a.get(), b.get()));
        }
        if let Some(n) = self.conflicting_pairs {
            parts.push(format!("conflicting_pairs: {}", n));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ExtraInfo::default().is_empty());
        assert_eq!(format!("{}", ExtraInfo::default()), "{}");
        assert!(!ExtraInfo::default().icf());
    }

    #[test]
    fn test_merge_prefers_self() {
        let a = ExtraInfo {
            is_conflict_free: Some(false),
            ..ExtraInfo::EMPTY
        };
        let b = ExtraInfo {
            is_conflict_free: Some(true),
            conflicting_pairs: Some(0),
            ..ExtraInfo::EMPTY
        };
        let merged = a.merge(b);
        assert_eq!(merged.is_conflict_free, Some(false));
        assert_eq!(merged.conflicting_pairs, Some(0));
    }

    #[test]
    fn test_display_lists_set_fields() {
        let info = ExtraInfo {
            is_conflict_free: Some(false),
            violating_pair: Some((ColumnIndex::new(0), ColumnIndex::new(2))),
            conflicting_pairs: Some(1),
        };
        assert_eq!(
            format!("{}", info),
            "{icf: false, violating_pair: (0, 2), conflicting_pairs: 1}"
        );
    }
}
