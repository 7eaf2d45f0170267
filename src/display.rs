//! Utilities for displaying and formatting polynomials
//!
//! This module turns coefficient vectors into human-readable equations such as
//! `y(x) = 2.00x² + 3.00x - 5.00`.
//!
//! # Key Concepts
//! - **[`Term`]**: Represents a single polynomial term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Helpers
//! - [`format_polynomial`]: Writes the full equation, highest degree first.
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Formats `x` with a unicode superscript exponent.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

pub mod unicode;

/// Default number of digits after the decimal point
pub const DEFAULT_PRECISION: usize = 2;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e3;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Represents the sign of a polynomial term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use approximator::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if Value::is_sign_negative(&coef) {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single term of a polynomial, e.g. `-3.00x²`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term, without its sign (e.g., `"2.00x²"`, `"3.14"`, `"x"`).
    pub body: String,
}

impl Term {
    /// Creates a new polynomial term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Formats the monomial term `coef · x^degree`.
    ///
    /// Returns `None` for a zero coefficient.
    ///
    /// # Example
    /// ```
    /// # use approximator::display::{Term, Sign};
    /// let term = Term::monomial(2, -3.0, 2).unwrap();
    /// assert_eq!(term.sign, Sign::Negative);
    /// assert_eq!(term.body, "3.00x²");
    /// ```
    pub fn monomial<T: Value>(degree: i32, coef: T, precision: usize) -> Option<Self> {
        let sign = Sign::from_coef(coef);

        let base = format_variable("x", degree);
        let coef = format_coefficient(coef, degree, precision)?;

        Some(Self::new(sign, format!("{coef}{base}")))
    }
}

/// Formats a numeric coefficient for display in a polynomial term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string for a unit coefficient on a non-constant term (`x`, not `1.00x`).
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e3`.
/// - Formats in scientific notation otherwise.
///
/// The sign is not included; see [`Sign`].
///
/// # Example
/// ```
/// # use approximator::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);

    if coef.is_zero() || abs <= T::epsilon() {
        return None;
    }

    if abs.abs_sub(T::one()) <= T::epsilon() && degree != 0 {
        return Some(String::new());
    }

    Some(unicode::float(abs, default_fixed_range(), precision))
}

/// Formats the variable part of a monomial term.
///
/// # Examples
/// ```
/// # use approximator::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 12), "x¹²");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}{}", unicode::superscript(&exp.to_string())),
    }
}

/// Writes `y(x) = …` for the monomial coefficients into `buffer`, highest degree first.
///
/// - `coefficients[i]` multiplies `xⁱ`.
/// - Zero coefficients are skipped; an all-zero polynomial is written as `y(x) = 0`.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
///
/// # Example
/// ```
/// # use approximator::display::{format_polynomial, DEFAULT_PRECISION};
/// let mut s = String::new();
/// format_polynomial(&mut s, &[-5.0, 3.0, 2.0], DEFAULT_PRECISION).unwrap();
/// assert_eq!(s, "y(x) = 2.00x² + 3.00x - 5.00");
/// ```
pub fn format_polynomial<B: std::fmt::Write, T: Value>(
    buffer: &mut B,
    coefficients: &[T],
    precision: usize,
) -> std::fmt::Result {
    let mut terms = coefficients
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(degree, &coef)| Term::monomial(degree as i32, coef, precision));

    write!(buffer, "y(x) = ")?;

    // First term carries no leading '+'
    let Some(first) = terms.next() else {
        return write!(buffer, "0");
    };
    if first.sign == Sign::Negative {
        write!(buffer, "{}", first.sign.char())?;
    }
    write!(buffer, "{}", first.body)?;

    for term in terms {
        write!(buffer, " {} {}", term.sign.char(), term.body)?;
    }

    Ok(())
}
