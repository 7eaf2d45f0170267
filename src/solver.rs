//! Gaussian elimination with partial pivoting.
//!
//! [`solve`] takes ownership of an [`AugmentedMatrix`], reduces it to upper-triangular
//! form in place, and back-substitutes for the coefficients.
//!
//! Before eliminating, the system is equilibrated with the symmetric scaling
//! `D · M · D`, `D = diag(1 / √|Mᵢᵢ|)`. For normal equations this turns the power sums,
//! which can span dozens of orders of magnitude, into a matrix with a unit diagonal and
//! entries no larger than one.
//!
//! At each elimination step the row with the largest magnitude in the pivot column is
//! swapped into place. A pivot at or below the configured [`Tolerance`] means the system
//! has no unique solution, and the solve fails with [`Error::SingularSystem`].
//!
//! Small but usable pivots do not fail. Instead the smallest pivot, relative to its
//! column, is reported in [`Conditioning`] so that callers can spot fits which
//! are likely to be numerically unreliable.
use crate::{
    error::{Error, Result},
    normal::AugmentedMatrix,
    value::Value,
};

/// Threshold below which a pivot is treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Tolerance<T: Value> {
    /// `ε · n · ‖mⱼ‖`, where `ε` is the machine epsilon of `T`, `n` the system size,
    /// and `‖mⱼ‖` the largest magnitude in column `j` of the equilibrated system.
    Machine,

    /// A fraction of `‖mⱼ‖`, the largest magnitude in the equilibrated pivot column.
    Relative(T),

    /// A fixed magnitude, compared against the pivot in the units of the original matrix.
    Absolute(T),
}
impl<T: Value> Tolerance<T> {
    /// Resolves the tolerance for a pivot column of an `n × n` system.
    ///
    /// `column_norm` is the largest magnitude in that column of the equilibrated system.
    ///
    /// # Errors
    /// Returns an error if `n` cannot be represented in `T`.
    pub fn threshold(&self, n: usize, column_norm: T) -> Result<T> {
        Ok(match self {
            Tolerance::Machine => T::epsilon() * T::try_cast(n)? * column_norm,
            Tolerance::Relative(r) => *r * column_norm,
            Tolerance::Absolute(a) => *a,
        })
    }
}

/// Solver configuration.
///
/// Can be loaded from JSON or any other serde format:
/// ```
/// # use approximator::solver::{SolverOptions, Tolerance};
/// let opts: SolverOptions = serde_json::from_str(
///     r#"{ "pivot_tolerance": { "Absolute": 1e-12 }, "ill_conditioned_below": 1e-6 }"#,
/// ).unwrap();
/// assert_eq!(opts.pivot_tolerance, Tolerance::Absolute(1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolverOptions<T: Value = f64> {
    /// Pivots at or below this magnitude are unusable.
    pub pivot_tolerance: Tolerance<T>,

    /// Flag the solve as ill-conditioned when `min |pivot| / ‖mⱼ‖` drops below this ratio.
    pub ill_conditioned_below: T,
}
impl<T: Value> Default for SolverOptions<T> {
    fn default() -> Self {
        Self {
            pivot_tolerance: Tolerance::Machine,
            ill_conditioned_below: T::epsilon().sqrt(),
        }
    }
}
impl<T: Value> SolverOptions<T> {
    /// Replaces the pivot tolerance
    #[must_use]
    pub fn with_pivot_tolerance(mut self, tolerance: Tolerance<T>) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Replaces the ill-conditioning ratio
    #[must_use]
    pub fn with_ill_conditioned_below(mut self, ratio: T) -> Self {
        self.ill_conditioned_below = ratio;
        self
    }
}

/// Advisory information about the numerical health of a solve.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Conditioning<T: Value = f64> {
    /// Smallest pivot of the equilibrated system, relative to its column.
    /// Near 1 is healthy, near ε is hopeless.
    pub min_pivot_ratio: T,

    /// Elimination step that produced the smallest pivot.
    pub min_pivot_column: usize,

    /// True if `min_pivot_ratio` fell below [`SolverOptions::ill_conditioned_below`].
    pub ill_conditioned: bool,
}

/// Coefficients produced by [`solve`], with conditioning diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T: Value = f64> {
    /// `coefficients[i]` multiplies `xⁱ`
    pub coefficients: Vec<T>,

    /// How trustworthy the coefficients are
    pub conditioning: Conditioning<T>,
}

/// Solves `M · c = b` by Gaussian elimination with partial pivoting.
///
/// The matrix is consumed and mutated in place.
///
/// # Errors
/// - [`Error::SingularSystem`] if every pivot candidate in some column is at or below the tolerance.
/// - [`Error::CastFailed`] if the system size cannot be represented in `T`.
///
/// # Example
/// ```
/// # use approximator::{normal::AugmentedMatrix, solver::{solve, SolverOptions}};
/// //  x + 2y = 5
/// // 3x + 4y = 11
/// let system = AugmentedMatrix::<f64>::from_row_slice(2, &[1.0, 2.0, 5.0, 3.0, 4.0, 11.0]).unwrap();
/// let solution = solve(system, &SolverOptions::default()).unwrap();
/// assert!((solution.coefficients[0] - 1.0).abs() < 1e-12);
/// assert!((solution.coefficients[1] - 2.0).abs() < 1e-12);
/// ```
pub fn solve<T: Value>(matrix: AugmentedMatrix<T>, options: &SolverOptions<T>) -> Result<Solution<T>> {
    let mut m = matrix.into_inner();
    let n = m.nrows();

    //
    // Equilibrate: M' = D·M·D, b' = D·b, and later c = D·z
    let scale: Vec<T> = (0..n).map(|i| equilibration_factor(m[(i, i)])).collect();
    for i in 0..n {
        for j in 0..n {
            m[(i, j)] = scale[i] * m[(i, j)] * scale[j];
        }
        m[(i, n)] = scale[i] * m[(i, n)];
    }

    let column_norms: Vec<T> = (0..n)
        .map(|j| (0..n).fold(T::zero(), |acc, i| nalgebra::RealField::max(acc, Value::abs(m[(i, j)]))))
        .collect();

    // Row factors follow their rows through the swaps, so pivots can be mapped back to original units
    let mut row_scale = scale.clone();

    let mut min_pivot_ratio = T::infinity();
    let mut min_pivot_column = 0;

    //
    // Forward elimination
    for i in 0..n {
        // First row with the largest magnitude wins, so pivoting is deterministic
        let mut pivot_row = i;
        let mut pivot_abs = Value::abs(m[(i, i)]);
        for j in (i + 1)..n {
            let candidate = Value::abs(m[(j, i)]);
            if candidate > pivot_abs {
                pivot_row = j;
                pivot_abs = candidate;
            }
        }

        let tolerance = options.pivot_tolerance.threshold(n, column_norms[i])?;
        let magnitude = match options.pivot_tolerance {
            Tolerance::Absolute(_) => pivot_abs / (row_scale[pivot_row] * scale[i]),
            Tolerance::Machine | Tolerance::Relative(_) => pivot_abs,
        };

        if magnitude <= tolerance || !pivot_abs.is_real() {
            log::debug!("no usable pivot in column {i} of {n} (best {magnitude:e}, tolerance {tolerance:e})");
            return Err(Error::SingularSystem { column: i, size: n });
        }

        if pivot_row != i {
            m.swap_rows(i, pivot_row);
            row_scale.swap(i, pivot_row);
        }

        let ratio = pivot_abs / column_norms[i];
        if ratio < min_pivot_ratio {
            min_pivot_ratio = ratio;
            min_pivot_column = i;
        }

        let pivot = m[(i, i)];
        for k in (i + 1)..n {
            let q = m[(k, i)] / pivot;
            if q == T::zero() {
                continue;
            }

            for col in i..=n {
                let delta = q * m[(i, col)];
                m[(k, col)] -= delta;
            }
        }
    }

    //
    // Back-substitution
    let mut coefficients = vec![T::zero(); n];
    for i in (0..n).rev() {
        let mut acc = m[(i, n)];
        for j in (i + 1)..n {
            acc -= m[(i, j)] * coefficients[j];
        }
        coefficients[i] = acc / m[(i, i)];
    }
    for (c, s) in coefficients.iter_mut().zip(&scale) {
        *c *= *s;
    }

    let ill_conditioned = min_pivot_ratio < options.ill_conditioned_below;
    if ill_conditioned {
        log::warn!(
            "ill-conditioned {n}x{n} system: smallest pivot is {min_pivot_ratio:e} of its column (column {min_pivot_column}); coefficients may be unreliable"
        );
    }

    log::debug!("solved {n}x{n} system, min pivot ratio {min_pivot_ratio:e}");

    Ok(Solution {
        coefficients,
        conditioning: Conditioning {
            min_pivot_ratio,
            min_pivot_column,
            ill_conditioned,
        },
    })
}

/// `1 / √|d|` for a diagonal entry `d`, or 1 if that is not a usable finite factor.
fn equilibration_factor<T: Value>(diagonal: T) -> T {
    let magnitude = Value::abs(diagonal);
    if magnitude > T::zero() {
        let factor = T::one() / magnitude.sqrt();
        if factor.is_real() && factor > T::zero() {
            return factor;
        }
    }
    T::one()
}
