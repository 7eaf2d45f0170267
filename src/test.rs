//! Assertions for checking fits in unit tests.
//!
//! Floating-point results rarely match exactly, so every macro here compares values with
//! a mixed tolerance: `|a - b| <= tol · max(1, |a|, |b|)`. Near zero that is an absolute
//! bound, for large values a relative one.
//!
//! ### [`crate::assert_close`]
//! `assert_eq!` equivalent for floats.
//! ```rust
//! # use approximator::assert_close;
//! assert_close!(0.1 + 0.2, 0.3);
//! assert_close!(1.0, 1.001, tol = 1e-2);
//! ```
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] for anything with `len()` and `iter()`.
//!
//! ### [`crate::assert_y`]
//! Spot-checks a single prediction of a [`crate::Polynomial`] or [`crate::CurveFit`].
//!
//! ### [`crate::assert_passes_through`]
//! Asserts that a curve reproduces every `(x, y)` point of a dataset.
//! Useful for interpolating fits, where the degree is one less than the number of points.
use crate::value::Value;

mod assertions;

/// Tolerance used by the assertion macros when none is given.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Returns true if `a` and `b` are within `tol` of each other, scaled by their magnitude.
///
/// NaN is never close to anything.
#[must_use]
pub fn is_close<T: Value>(a: T, b: T, tol: f64) -> bool {
    if a == b {
        return true;
    }

    let Ok(tol) = T::try_cast(tol) else {
        return false;
    };
    let scale = nalgebra::RealField::max(
        T::one(),
        nalgebra::RealField::max(Value::abs(a), Value::abs(b)),
    );
    Value::abs(a - b) <= tol * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closeness_scales_with_magnitude() {
        assert!(is_close(1.0, 1.0 + 1e-12, DEFAULT_TOLERANCE));
        assert!(is_close(1e12, 1e12 + 1.0, DEFAULT_TOLERANCE));
        assert!(!is_close(1e-3, 2e-3, DEFAULT_TOLERANCE));
        assert!(!is_close(f64::NAN, f64::NAN, 1.0));
        assert!(is_close(f64::INFINITY, f64::INFINITY, 0.0));
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn assert_close_panics() {
        crate::assert_close!(1.0, 1.1);
    }

    #[test]
    #[should_panic(expected = "row 2")]
    fn assert_close_custom_message() {
        crate::assert_close!(1.0, 1.1, tol = 1e-3, "row {}", 2);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn assert_all_close_lengths() {
        crate::assert_all_close!(vec![1.0, 2.0], [1.0]);
    }
}
