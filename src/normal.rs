//! Normal-equation assembly for the monomial basis.
//!
//! A least-squares fit of degree `d` to the samples `(xᵢ, yᵢ)` minimises
//! `Σ (yᵢ - p(xᵢ))²`, which leads to the square system `XᵀX · c = Xᵀy`.
//! For the monomial basis `1, x, …, x^d` every entry of that system is a power sum:
//!
//! ```text
//! M[i][j] = S(i + j)     where S(k) = Σ xᵢᵏ         for k in 0..=2d
//! b[i]    = T(i)         where T(k) = Σ yᵢ · xᵢᵏ    for k in 0..=d
//! ```
//!
//! So the builder never needs the `N × (d+1)` design matrix, only `3d + 2` running sums.
//!
//! <div class="warning">
//!
//! **Precision**
//!
//! Power sums grow like `x^(2d)`, and the condition number of this Hankel system grows
//! exponentially with the degree. Wide x-ranges or high degrees will lose precision.
//! The solver reports this through [`crate::solver::Conditioning`] rather than failing.
//! </div>
use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    value::{distinct_x_count, first_non_finite, Value},
};

/// An `n × (n+1)` linear system `M · c = b`, with `b` stored as the last column.
///
/// Produced by [`build`] and consumed by [`crate::solver::solve`], which eliminates in place.
///
/// # Example
/// ```
/// # use approximator::normal::AugmentedMatrix;
/// // 2a + b = 5
/// //  a + b = 3
/// let system = AugmentedMatrix::from_row_slice(2, &[2.0, 1.0, 5.0, 1.0, 1.0, 3.0]).unwrap();
/// assert_eq!(system.size(), 2);
/// assert_eq!(system.rhs(0), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedMatrix<T: Value = f64> {
    inner: DMatrix<T>,
}
impl<T: Value> AugmentedMatrix<T> {
    /// Creates an augmented matrix from `n` rows of `n + 1` values each, in row-major order.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `rows.len() != n * (n + 1)`, or [`Error::NoData`] if `n == 0`.
    pub fn from_row_slice(n: usize, rows: &[T]) -> Result<Self> {
        if n == 0 {
            return Err(Error::NoData);
        }

        let expected = n * (n + 1);
        if rows.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: rows.len(),
            });
        }

        Ok(Self {
            inner: DMatrix::from_row_slice(n, n + 1, rows),
        })
    }

    /// Number of unknowns, `n`
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.nrows()
    }

    /// Entry `M[row][column]` of the square block
    #[must_use]
    pub fn coefficient(&self, row: usize, column: usize) -> T {
        self.inner[(row, column)]
    }

    /// Entry `b[row]` of the right-hand side
    #[must_use]
    pub fn rhs(&self, row: usize) -> T {
        self.inner[(row, self.size())]
    }

    /// The whole system as a matrix, right-hand side last.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<T> {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> DMatrix<T> {
        self.inner
    }
}

/// Compensated (Kahan) accumulator.
///
/// Keeps the low-order bits lost by each addition in `compensation` and feeds them back
/// into the next one.
#[derive(Debug, Clone, Copy)]
struct KahanSum<T: Value> {
    sum: T,
    compensation: T,
}
impl<T: Value> KahanSum<T> {
    fn new() -> Self {
        Self {
            sum: T::zero(),
            compensation: T::zero(),
        }
    }

    fn add(&mut self, value: T) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }
}

/// Returns `(degree + 1, 2·degree + 1)`, or `None` if the augmented matrix would not be addressable.
fn system_size(degree: usize) -> Option<(usize, usize)> {
    let k = degree.checked_add(1)?;
    let power_count = degree.checked_mul(2)?.checked_add(1)?;
    k.checked_mul(k + 1)?;
    Some((k, power_count))
}

/// Builds the normal equations for a degree `degree` monomial fit of `samples`.
///
/// The result has `degree + 1` rows and `degree + 2` columns. Both the square block and the
/// right-hand side are accumulated in a single pass over the samples.
///
/// With `r` distinct x-values the system has rank `min(r, degree + 1)`. When `degree + 1 > r`
/// elimination would stall at column `r`, so that is reported up front without allocating
/// the matrix. Systems that are only numerically singular are left to the solver.
///
/// # Errors
/// - [`Error::NoData`] if `samples` is empty.
/// - [`Error::NonFiniteSample`] if any coordinate is NaN or infinite.
/// - [`Error::DegreeOverflow`] if the system for `degree` could not even be indexed.
/// - [`Error::SingularSystem`] if there are fewer distinct x-values than `degree + 1`.
///
/// # Example
/// ```
/// # use approximator::normal::build;
/// let system = build(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)], 1).unwrap();
///
/// // [ n   Σx  | Σy  ]
/// // [ Σx  Σx² | Σxy ]
/// assert_eq!(system.coefficient(0, 0), 4.0);
/// assert_eq!(system.coefficient(0, 1), 6.0);
/// assert_eq!(system.coefficient(1, 1), 14.0);
/// assert_eq!(system.rhs(0), 12.0);
/// assert_eq!(system.rhs(1), 28.0);
/// ```
pub fn build<T: Value>(samples: &[(T, T)], degree: usize) -> Result<AugmentedMatrix<T>> {
    if samples.is_empty() {
        return Err(Error::NoData);
    }
    if let Some(index) = first_non_finite(samples) {
        return Err(Error::NonFiniteSample { index });
    }

    let (k, power_count) = system_size(degree).ok_or(Error::DegreeOverflow)?;

    let distinct = distinct_x_count(samples);
    if distinct < k {
        log::debug!("{distinct} distinct x-values cannot determine {k} coefficients");
        return Err(Error::SingularSystem {
            column: distinct,
            size: k,
        });
    }

    let mut power_sums = vec![KahanSum::new(); power_count];
    let mut weighted_sums = vec![KahanSum::new(); k];

    for &(x, y) in samples {
        let mut power = T::one();
        for (i, sum) in power_sums.iter_mut().enumerate() {
            sum.add(power);
            if i < k {
                weighted_sums[i].add(y * power);
            }
            power *= x;
        }
    }

    let mut inner = DMatrix::zeros(k, k + 1);
    for i in 0..k {
        for j in 0..k {
            inner[(i, j)] = power_sums[i + j].sum;
        }
        inner[(i, k)] = weighted_sums[i].sum;
    }

    log::debug!(
        "assembled {k}x{} normal equations from {} samples",
        k + 1,
        samples.len()
    );

    Ok(AugmentedMatrix { inner })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_zero_is_count_and_sum() {
        let system = build(&[(5.0, 1.0), (-3.0, 2.0), (0.25, 6.0)], 0).unwrap();
        assert_eq!(system.size(), 1);
        assert_eq!(system.as_matrix().shape(), (1, 2));
        assert_eq!(system.coefficient(0, 0), 3.0);
        assert_eq!(system.rhs(0), 9.0);
    }

    #[test]
    fn hankel_structure() {
        let data = [(1.0, 1.0), (2.0, 0.5), (-1.0, 3.0), (0.5, -2.0)];
        let system = build(&data, 3).unwrap();
        assert_eq!(system.as_matrix().shape(), (4, 5));

        for i in 0..4 {
            for j in 0..4 {
                let expected: f64 = data.iter().map(|(x, _)| x.powi((i + j) as i32)).sum();
                assert_eq!(system.coefficient(i, j), expected, "M[{i}][{j}]");
                if i + 1 < 4 && j > 0 {
                    assert_eq!(system.coefficient(i, j), system.coefficient(i + 1, j - 1));
                }
            }

            let expected: f64 = data.iter().map(|(x, y)| y * x.powi(i as i32)).sum();
            assert_eq!(system.rhs(i), expected, "b[{i}]");
        }
    }

    #[test]
    fn repeated_samples_weight_the_sums() {
        let once = build(&[(2.0, 1.0), (3.0, 4.0)], 1).unwrap();
        let twice = build(&[(2.0, 1.0), (2.0, 1.0), (3.0, 4.0)], 1).unwrap();
        assert_eq!(twice.coefficient(0, 0), once.coefficient(0, 0) + 1.0);
        assert_eq!(twice.coefficient(1, 1), once.coefficient(1, 1) + 4.0);
        assert_eq!(twice.rhs(1), once.rhs(1) + 2.0);
    }

    #[test]
    fn rejects_bad_input() {
        let empty: [(f64, f64); 0] = [];
        assert_eq!(build(&empty, 1), Err(Error::NoData));
        assert_eq!(
            build(&[(0.0, 1.0), (f64::NAN, 2.0)], 1),
            Err(Error::NonFiniteSample { index: 1 })
        );
        assert_eq!(
            build(&[(0.0, f64::INFINITY)], 0),
            Err(Error::NonFiniteSample { index: 0 })
        );
    }

    #[test]
    fn oversized_degrees_are_rejected() {
        let data = [(0.0, 1.0), (1.0, 2.0)];
        assert_eq!(build(&data, usize::MAX), Err(Error::DegreeOverflow));
        assert_eq!(build(&data, usize::MAX / 2), Err(Error::DegreeOverflow));
        assert_eq!(system_size(2), Some((3, 5)));
    }

    #[test]
    fn too_few_distinct_x_values_fail_before_assembly() {
        let data = [(1.0, 1.0), (2.0, 0.0), (1.0, 3.0)];
        assert_eq!(
            build(&data, 2),
            Err(Error::SingularSystem { column: 2, size: 3 })
        );
        assert_eq!(
            build(&data, 1_000_000_000),
            Err(Error::SingularSystem {
                column: 2,
                size: 1_000_000_001
            })
        );
        assert!(build(&data, 1).is_ok());
    }

    #[test]
    fn compensated_sum_keeps_small_terms() {
        let mut sum = KahanSum::new();
        sum.add(1.0e16);
        for _ in 0..10 {
            sum.add(1.0);
        }
        sum.add(-1.0e16);
        assert_eq!(sum.sum, 10.0);
    }

    #[test]
    fn from_row_slice_validates_length() {
        assert_eq!(
            AugmentedMatrix::from_row_slice(2, &[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch {
                expected: 6,
                found: 3
            })
        );
        assert_eq!(AugmentedMatrix::<f64>::from_row_slice(0, &[]), Err(Error::NoData));

        let system = AugmentedMatrix::from_row_slice(1, &[2.0, 8.0]).unwrap();
        assert_eq!(system.coefficient(0, 0), 2.0);
        assert_eq!(system.rhs(0), 8.0);
    }
}
