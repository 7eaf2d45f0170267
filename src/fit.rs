use std::{borrow::Cow, ops::RangeInclusive};

use num_traits::PrimInt;

use crate::{
    error::{Error, Result},
    normal,
    solver::{self, Conditioning, Solution, SolverOptions},
    statistics,
    value::{CoordExt, SteppedValues, Value},
    Polynomial,
};

/// Converts any primitive integer into a degree, rejecting negatives.
fn to_degree<D: PrimInt>(degree: D) -> Result<usize> {
    if degree < D::zero() {
        return Err(Error::NegativeDegree(degree.to_i128().unwrap_or(i128::MIN)));
    }
    degree.to_usize().ok_or(Error::DegreeOverflow)
}

/// Fits a least-squares polynomial of the given degree and returns its coefficients.
///
/// `coefficients[i]` multiplies `xⁱ`. Use [`crate::evaluate`] to evaluate the result,
/// or [`CurveFit`] if you want to keep the data and diagnostics around.
///
/// # Errors
/// - [`Error::NoData`]: `samples` is empty.
/// - [`Error::NegativeDegree`]: `degree < 0`.
/// - [`Error::NonFiniteSample`]: a coordinate is NaN or infinite.
/// - [`Error::DegreeOverflow`]: `degree` is too large to represent the system.
/// - [`Error::SingularSystem`]: the data has fewer distinct x-values than `degree + 1`,
///   or the normal equations are numerically singular.
///
/// # Example
/// ```
/// let data: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
/// let coefficients = approximator::fit(&data, 1).unwrap();
/// assert!(coefficients[0].abs() < 1e-9);
/// assert!((coefficients[1] - 2.0).abs() < 1e-9);
/// ```
pub fn fit<T: Value, D: PrimInt>(samples: &[(T, T)], degree: D) -> Result<Vec<T>> {
    let solution = fit_with(samples, degree, &SolverOptions::default())?;
    Ok(solution.coefficients)
}

/// Fits a least-squares polynomial with explicit solver options.
///
/// Returns the coefficients along with the [`Conditioning`] of the solve.
///
/// # Errors
/// See [`fit`].
pub fn fit_with<T: Value, D: PrimInt>(
    samples: &[(T, T)],
    degree: D,
    options: &SolverOptions<T>,
) -> Result<Solution<T>> {
    let degree = to_degree(degree)?;
    let system = normal::build(samples, degree)?;
    solver::solve(system, options)
}

/// A polynomial fitted to a set of data points.
///
/// Keeps the source data (borrowed or owned) next to the fitted [`Polynomial`],
/// so the quality of the fit can be inspected afterwards.
///
/// # How it works
/// - Condenses the data into power sums and builds the normal equations `XᵀX · c = Xᵀy`
///   (see [`crate::normal`]).
/// - Solves them by Gaussian elimination with partial pivoting (see [`crate::solver`]).
///
/// # Example
/// ```
/// # use approximator::CurveFit;
/// let data: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
/// let fit = CurveFit::new(&data[..], 2).unwrap();
/// assert!((fit.y(3.0) - 13.0).abs() < 1e-9);
/// println!("{fit}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit<'data, T: Value = f64> {
    data: Cow<'data, [(T, T)]>,
    x_range: RangeInclusive<T>,
    function: Polynomial<'static, T>,
    conditioning: Conditioning<T>,
}
impl<'data, T: Value> CurveFit<'data, T> {
    /// Creates a new polynomial fit of the given degree, with default solver options.
    ///
    /// # Errors
    /// See [`fit`].
    pub fn new(data: impl Into<Cow<'data, [(T, T)]>>, degree: impl PrimInt) -> Result<Self> {
        Self::with_options(data, degree, &SolverOptions::default())
    }

    /// Creates a new polynomial fit of the given degree.
    ///
    /// # Errors
    /// See [`fit`].
    pub fn with_options(
        data: impl Into<Cow<'data, [(T, T)]>>,
        degree: impl PrimInt,
        options: &SolverOptions<T>,
    ) -> Result<Self> {
        let data: Cow<_> = data.into();
        let Solution {
            coefficients,
            conditioning,
        } = fit_with(&data, degree, options)?;

        let x_range = data.x_range().ok_or(Error::NoData)?;
        Ok(Self {
            data,
            x_range,
            function: Polynomial::new(coefficients),
            conditioning,
        })
    }

    /// Returns an owned version of this curve fit, with a full copy of the data.
    #[must_use]
    pub fn to_owned(&self) -> CurveFit<'static, T> {
        CurveFit {
            data: Cow::Owned(self.data.to_vec()),
            x_range: self.x_range.clone(),
            function: self.function.clone(),
            conditioning: self.conditioning,
        }
    }

    /// Returns the degree of the fitted polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// Returns the fitted coefficients; index `i` multiplies `xⁱ`.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Returns the data the polynomial was fitted to.
    #[must_use]
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the range of x-values covered by the data.
    #[must_use]
    pub fn x_range(&self) -> RangeInclusive<T> {
        self.x_range.clone()
    }

    /// Returns the numerical conditioning of the solve.
    ///
    /// If [`Conditioning::ill_conditioned`] is set, the coefficients may be unreliable;
    /// consider a lower degree or narrower x-range.
    #[must_use]
    pub fn conditioning(&self) -> Conditioning<T> {
        self.conditioning
    }

    /// Borrows the fitted polynomial.
    #[must_use]
    pub fn as_polynomial(&self) -> &Polynomial<'static, T> {
        &self.function
    }

    /// Consumes the fit, returning the polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Polynomial<'static, T> {
        self.function
    }

    /// Evaluates the fit at `x`.
    ///
    /// Extrapolating far outside [`CurveFit::x_range`] is allowed, but rarely meaningful.
    pub fn y(&self, x: T) -> T {
        self.function.y(x)
    }

    /// Evaluates the fit at each x-value.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        self.function.solve(x)
    }

    /// Evaluates the fit over an inclusive range with a fixed step.
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Vec<(T, T)> {
        self.function.solve(SteppedValues::new(range, step))
    }

    /// Evaluates the fit at every x-value of the source data.
    #[must_use]
    pub fn solution(&self) -> Vec<(T, T)> {
        self.function.solve(self.data.x_iter())
    }

    /// Returns `(x, y - y_fit)` for every data point.
    #[must_use]
    pub fn residuals(&self) -> Vec<(T, T)> {
        self.data
            .iter()
            .map(|&(x, y)| (x, y - self.function.y(x)))
            .collect()
    }

    /// Mean squared error of the fit against its data.
    #[must_use]
    pub fn mean_squared_error(&self) -> T {
        statistics::mean_squared_error(self.data.y_iter(), self.fitted_y())
    }

    /// Root mean squared error of the fit against its data.
    #[must_use]
    pub fn root_mean_squared_error(&self) -> T {
        statistics::root_mean_squared_error(self.data.y_iter(), self.fitted_y())
    }

    /// R² of the fit against its data. See [`statistics::r_squared`].
    #[must_use]
    pub fn r_squared(&self) -> T {
        statistics::r_squared(self.data.y_iter(), self.fitted_y())
    }

    /// Returns a human-readable equation, e.g. `y(x) = 2.00x² + 3.00x - 5.00`.
    #[must_use]
    pub fn equation(&self) -> String {
        self.function.equation()
    }

    /// Returns a serializable summary of the fit.
    #[must_use]
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            data_points: self.data.len(),
            coefficients: self.coefficients().to_vec(),
            residual_variance: statistics::residual_variance(
                self.data.y_iter(),
                self.fitted_y(),
                T::from_positive_int(self.coefficients().len()),
            ),
            mse: self.mean_squared_error(),
            r_squared: self.r_squared(),
            conditioning: self.conditioning,
        }
    }

    fn fitted_y(&self) -> impl Iterator<Item = T> + '_ {
        self.data.x_iter().map(|x| self.function.y(x))
    }
}

impl<T: Value> AsRef<Polynomial<'static, T>> for CurveFit<'_, T> {
    fn as_ref(&self) -> &Polynomial<'static, T> {
        &self.function
    }
}

impl<T: Value> std::fmt::Display for CurveFit<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.function, f)
    }
}

/// A set of diagnostic properties for a curve fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The degree of the fitted polynomial.
    pub degree: usize,

    /// The number of data points used in the fit.
    pub data_points: usize,

    /// The coefficients of the fitted polynomial, lowest degree first.
    pub coefficients: Vec<T>,

    /// Unbiased estimate of the noise variance, `SS_res / (n - k)`.
    pub residual_variance: T,

    /// The mean squared error of the fit.
    pub mse: T,

    /// The R² value of the fit.
    pub r_squared: T,

    /// Numerical health of the solve.
    pub conditioning: Conditioning<T>,
}
