//! Monomial polynomials and their evaluation by Horner's scheme.

use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    display::{self, DEFAULT_PRECISION},
    value::{SteppedValues, Value},
};

/// Evaluates `Σ coefficients[i] · xⁱ` using Horner's scheme.
///
/// Accumulates from the highest degree down, `((c_d·x + c_{d-1})·x + …)·x + c_0`,
/// so no power of `x` is ever computed on its own.
///
/// An empty coefficient slice evaluates to zero.
///
/// # Example
/// ```
/// # use approximator::evaluate;
/// // 1 + 2x + 3x²
/// assert_eq!(evaluate(&[1.0, 2.0, 3.0], 2.0), 17.0);
/// assert_eq!(evaluate(&[1.0, 2.0, 3.0], 0.0), 1.0);
/// ```
pub fn evaluate<T: Value>(coefficients: &[T], x: T) -> T {
    coefficients
        .iter()
        .rev()
        .fold(T::zero(), |acc, &c| acc * x + c)
}

/// A polynomial in the monomial basis, `y(x) = Σ cᵢ·xⁱ`.
///
/// This is a view over a coefficient vector, borrowed or owned. It is not tied to any
/// dataset and can be evaluated for any x-value. Nothing is cached: every evaluation is
/// recomputed from the coefficients.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a polynomial from its coefficients, lowest degree first.
    ///
    /// An empty coefficient vector is the zero polynomial.
    ///
    /// # Example
    /// ```
    /// # use approximator::Polynomial;
    /// let poly = Polynomial::new(vec![1.0, 0.0, -0.5]); // 1 - 0.5x²
    /// assert_eq!(poly.y(2.0), -1.0);
    /// ```
    pub fn new(coefficients: impl Into<Cow<'a, [T]>>) -> Self {
        Self {
            coefficients: coefficients.into(),
        }
    }

    /// Creates a polynomial borrowing its coefficients.
    #[must_use]
    pub const fn borrowed(coefficients: &'a [T]) -> Self {
        Self {
            coefficients: Cow::Borrowed(coefficients),
        }
    }

    /// Converts the polynomial into an owned version.
    pub fn into_owned(self) -> Polynomial<'static, T> {
        Polynomial {
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Consumes the polynomial, returning its coefficients.
    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients.into_owned()
    }

    /// Returns a reference to the polynomial's coefficients.
    ///
    /// For example in `y(x) = 2x² - 3x + 1`, coefficients = `[1.0, -3.0, 2.0]`
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial, `coefficients().len() - 1`.
    ///
    /// This is the degree that was requested for a fit, even if the leading coefficient came out as zero.
    /// The zero polynomial with no coefficients has degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given x-value. See [`evaluate`].
    pub fn y(&self, x: T) -> T {
        evaluate(&self.coefficients, x)
    }

    /// Evaluates the polynomial at each x-value, returning `(x, y)` pairs.
    ///
    /// # Example
    /// ```
    /// # use approximator::Polynomial;
    /// let poly = Polynomial::borrowed(&[0.0, 2.0]);
    /// assert_eq!(poly.solve([1.0, 2.0]), vec![(1.0, 2.0), (2.0, 4.0)]);
    /// ```
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Evaluates the polynomial over an inclusive range of x-values with a fixed step.
    ///
    /// # Example
    /// ```
    /// # use approximator::Polynomial;
    /// let poly = Polynomial::borrowed(&[0.0, 0.0, 1.0]);
    /// let points = poly.solve_range(0.0..=2.0, 1.0);
    /// assert_eq!(points, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
    /// ```
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Vec<(T, T)> {
        self.solve(SteppedValues::new(range, step))
    }

    /// Returns a human-readable equation, e.g. `y(x) = 2.00x² + 3.00x - 5.00`.
    #[must_use]
    pub fn equation(&self) -> String {
        let mut output = String::new();
        display::format_polynomial(&mut output, self.coefficients(), DEFAULT_PRECISION)
            .expect("String should be infallible");
        output
    }
}

impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        display::format_polynomial(f, self.coefficients(), precision)
    }
}

impl<'a, T: Value> AsRef<Polynomial<'a, T>> for Polynomial<'a, T> {
    fn as_ref(&self) -> &Polynomial<'a, T> {
        self
    }
}

impl<T: Value> From<Vec<T>> for Polynomial<'static, T> {
    fn from(coefficients: Vec<T>) -> Self {
        Self::new(coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn horner_matches_power_sum() {
        let coefficients = [0.5, -1.25, 3.0, 0.75];
        for x in [-2.0, -0.5, 0.0, 1.0, 3.5] {
            let expected: f64 = coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| c * x.powi(i as i32))
                .sum();
            assert_close!(evaluate(&coefficients, x), expected);
        }
    }

    #[test]
    fn evaluate_at_zero_is_constant_term() {
        for coefficients in [vec![7.5], vec![-3.0, 1e10, -4e20], vec![0.0, 1.0]] {
            assert_eq!(evaluate(&coefficients, 0.0), coefficients[0]);
        }
        assert_eq!(evaluate::<f64>(&[], 4.0), 0.0);
    }

    #[test]
    fn degree_and_ownership() {
        let coefficients = vec![1.0, 2.0, 3.0];
        let borrowed = Polynomial::borrowed(&coefficients);
        assert_eq!(borrowed.degree(), 2);

        let owned = borrowed.clone().into_owned();
        assert_eq!(owned, borrowed);
        assert_eq!(owned.into_coefficients(), coefficients);

        assert_eq!(Polynomial::<f64>::new(vec![]).degree(), 0);
    }

    #[test]
    fn display_respects_precision() {
        let poly = Polynomial::from(vec![-5.0, 3.0, 2.0]);
        assert_eq!(poly.to_string(), "y(x) = 2.00x² + 3.00x - 5.00");
        assert_eq!(format!("{poly:.1}"), "y(x) = 2.0x² + 3.0x - 5.0");
        assert_eq!(poly.equation(), poly.to_string());
    }

    #[test]
    fn works_with_f32() {
        let poly = Polynomial::<f32>::borrowed(&[1.0, 1.0]);
        assert_eq!(poly.y(2.0), 3.0);
    }
}
