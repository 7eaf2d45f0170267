//! Goodness-of-fit metrics.
//!
//! Small helpers used by [`crate::CurveFit`] to describe how well a polynomial follows
//! its data. They all work over iterators of observed values `y` and predicted values `y_fit`.
//!
//! # Example
//! ```rust
//! # use approximator::statistics::{r_squared, mean_squared_error};
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.0, 2.0, 3.0];
//! assert_eq!(r_squared(y.iter().copied(), y_fit.iter().copied()), 1.0);
//! assert_eq!(mean_squared_error(y.into_iter(), y_fit.into_iter()), 0.0);
//! ```
use crate::value::Value;

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// Returns NaN if the iterator yields no elements.
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut n = T::zero();
    for value in data {
        sum += value;
        n += T::one();
    }
    sum / n
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number, at most 1, that tells you how well the model explains the data:
/// - `0` means the model explains no more than the mean would.
/// - `1` means the model explains all the variation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// If every observed value is identical (`SS_tot = 0`), returns `1` for a perfect fit and `0` otherwise.
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total == T::zero() {
        return if ss_residual == T::zero() {
            T::one()
        } else {
            T::zero()
        };
    }

    T::one() - (ss_residual / ss_total)
}

/// Computes the mean squared error (MSE) between observed and predicted values.
///
/// ```math
/// MSE = Σ (y_i - y_fit_i)² / N
/// ```
///
/// Returns NaN for empty input.
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::powi(y - y_fit, 2)))
}

/// Computes the root mean squared error (RMSE), in the same units as `y`.
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean_squared_error(y, y_fit).sqrt()
}

/// Computes the residual variance of a model's predictions.
///
/// The unbiased estimate of the error variance after fitting `k` parameters:
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// ```
///
/// Returns zero when there are no spare degrees of freedom (`n <= k`); the
/// model then passes through every point.
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> T {
    let mut ss_residual = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        ss_residual += Value::powi(y - y_fit, 2);
        n += T::one();
    }

    if n <= k {
        return T::zero();
    }
    ss_residual / (n - k)
}
