//! Numeric types and iteration utilities for fitting.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - Unambiguous `abs`, `powi` and `is_real` helpers.
//! - [`CoordExt`]: Access to the `x` and `y` channels of a sample set.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   useful for generating evaluation points for polynomials.
//!
//! # Example
//!
//! ```rust
//! use approximator::value::{SteppedValues, Value};
//!
//! // Create a range of f64 values from 0.0 to 1.0 in steps of 0.25
//! let xs: Vec<f64> = SteppedValues::new(0.0..=1.0, 0.25).collect();
//! assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//!
//! let four = f64::two().powi(2);
//! assert_eq!(four, 4.0);
//! ```
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Numeric type for samples, coefficients and matrices
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_sub(self, other: Self) -> Self {
        nalgebra::ComplexField::abs(self - other)
    }

    /// True if the value is neither NaN nor infinite
    fn is_real(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }

    /// Check if the value is negative
    fn is_sign_negative(&self) -> bool {
        self < &Self::zero()
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration.
///
/// Values are computed as `start + i * step` rather than by repeated addition,
/// so rounding error does not accumulate along the range.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    ///
    /// A non-positive or non-finite `step` yields nothing.
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }

    /// Creates a new iterator over stepped values in a range with a step of 1.0
    pub fn new_unit(range: RangeInclusive<T>) -> Self {
        Self::new(range, T::one())
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= T::zero() || !self.step.is_real() {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(value)
        } else {
            None
        }
    }
}

/// Extension trait for accessing the `x` and `y` channels of a sample set.
///
/// # Examples
///
/// ```
/// # use approximator::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// assert_eq!(data.x_range(), Some(0.0..=2.0));
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Collects the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Collects the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the inclusive range covered by the x-coordinates, or `None` if there are none.
    fn x_range(&self) -> Option<RangeInclusive<T>> {
        self.x_iter()
            .fold(None, |acc: Option<(T, T)>, x| {
                Some(match acc {
                    Some((min, max)) => (
                        nalgebra::RealField::min(min, x),
                        nalgebra::RealField::max(max, x),
                    ),
                    None => (x, x),
                })
            })
            .map(|(start, end)| start..=end)
    }

    /// Returns the inclusive range covered by the y-coordinates, or `None` if there are none.
    fn y_range(&self) -> Option<RangeInclusive<T>> {
        self.y_iter()
            .fold(None, |acc: Option<(T, T)>, y| {
                Some(match acc {
                    Some((min, max)) => (
                        nalgebra::RealField::min(min, y),
                        nalgebra::RealField::max(max, y),
                    ),
                    None => (y, y),
                })
            })
            .map(|(start, end)| start..=end)
    }
}
impl<T: Value> CoordExt<T> for [(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

/// Returns the index of the first sample with a NaN or infinite coordinate.
pub(crate) fn first_non_finite<T: Value>(data: &[(T, T)]) -> Option<usize> {
    data.iter()
        .position(|(x, y)| !x.is_real() || !y.is_real())
}

/// Counts the distinct x-coordinates. Expects finite values.
pub(crate) fn distinct_x_count<T: Value>(data: &[(T, T)]) -> usize {
    let mut xs: Vec<T> = data.x();
    xs.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    xs.dedup();
    xs.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = SteppedValues::new(0.0..=1.0, 0.1);
        let values: Vec<_> = range.collect();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn stepped_values_reject_bad_steps() {
        assert_eq!(SteppedValues::new(0.0..=1.0, 0.0).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, -1.0).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, f64::NAN).count(), 0);
        assert_eq!(SteppedValues::new_unit(0.0..=3.0).count(), 4);
    }

    #[test]
    fn coord_ranges() {
        let data = vec![(3.0, -1.0), (-2.0, 5.0), (0.5, 0.0)];
        assert_eq!(data.x_range(), Some(-2.0..=3.0));
        assert_eq!(data.y_range(), Some(-1.0..=5.0));

        let empty: Vec<(f64, f64)> = vec![];
        assert_eq!(empty.x_range(), None);
    }

    #[test]
    fn finds_non_finite_samples() {
        let data = [(0.0, 1.0), (1.0, f64::NAN), (f64::INFINITY, 0.0)];
        assert_eq!(first_non_finite(&data), Some(1));
        assert_eq!(first_non_finite(&data[..1]), None);
    }

    #[test]
    fn counts_distinct_x_values() {
        let data = [(2.0, 1.0), (-1.0, 0.0), (2.0, 5.0), (0.0, 1.0), (-0.0, 3.0)];
        assert_eq!(distinct_x_count(&data), 3);
        assert_eq!(distinct_x_count::<f64>(&[]), 0);
    }

    #[test]
    fn casts() {
        assert_eq!(f64::try_cast(3usize), Ok(3.0));
        assert_eq!(f32::from_positive_int(8), 8.0);
        assert!(Value::is_sign_negative(&-0.5f64));
    }
}
