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

use crate::bound::{
    algorithm::BoundingAlgorithm, combined::MaxBound, error::BoundError,
    pairs::ConflictPairBound, zero::ZeroBound,
};
use phyflip_model::num::FlipCount;

/// Names accepted by `estimator_by_name`, case-insensitive.
pub const ESTIMATOR_NAMES: &[&str] = &["ZeroBound", "ConflictPairBound", "MaxBound"];

/// Creates a boxed estimator from its name.
///
/// `MaxBound` combines `ZeroBound` and `ConflictPairBound`. Unknown names
/// fail with `BoundError::NotImplemented`.
pub fn estimator_by_name<T>(name: &str) -> Result<Box<dyn BoundingAlgorithm<T>>, BoundError>
where
    T: FlipCount,
{
    let estimator: Box<dyn BoundingAlgorithm<T>> = if name.eq_ignore_ascii_case("ZeroBound") {
        Box::new(ZeroBound::<T>::new())
    } else if name.eq_ignore_ascii_case("ConflictPairBound") {
        Box::new(ConflictPairBound::<T>::new())
    } else if name.eq_ignore_ascii_case("MaxBound") {
        Box::new(MaxBound::new(
            ZeroBound::<T>::new(),
            ConflictPairBound::<T>::new(),
        ))
    } else {
        return Err(BoundError::NotImplemented {
            estimator: name.to_owned(),
            operation: "construction",
        });
    };
    log::debug!("selected estimator {}", estimator.name());
    Ok(estimator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in ESTIMATOR_NAMES {
            let e = estimator_by_name::<i64>(name).unwrap();
            assert!(e.name().starts_with(name), "{} vs {}", e.name(), name);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let e = estimator_by_name::<i32>("conflictpairbound").unwrap();
        assert_eq!(e.name(), "ConflictPairBound");
    }

    #[test]
    fn test_unknown_name_is_not_implemented() {
        let err = estimator_by_name::<i64>("LinearProgramBound").unwrap_err();
        assert_eq!(
            err,
            BoundError::NotImplemented {
                estimator: "LinearProgramBound".to_owned(),
                operation: "construction",
            }
        );
    }
}
