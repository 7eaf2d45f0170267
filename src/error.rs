//! Error types for polynomial fitting
//!
//! This module defines the failure modes of the fitting engine, along with a
//! convenient `Result` alias.
//!
//! Errors fall into two groups:
//! - Invalid input, reported before any computation is attempted (see [`Error::is_invalid_input`]).
//! - [`Error::SingularSystem`], reported by the solver when the normal equations have no unique solution.
//!
//! A poorly conditioned system is *not* an error. See [`crate::solver::Conditioning`].

/// Errors that can occur while building or solving a polynomial fit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// The requested degree was negative.
    #[error("Polynomial degree must be non-negative, got {0}")]
    NegativeDegree(i128),

    /// The requested degree does not fit in a `usize`.
    #[error("Polynomial degree is too large to represent")]
    DegreeOverflow,

    /// A sample had a NaN or infinite coordinate.
    #[error("Sample at index {index} is not finite")]
    NonFiniteSample {
        /// Position of the offending sample
        index: usize,
    },

    /// A raw augmented matrix had the wrong number of entries.
    #[error("Augmented matrix needs {expected} entries, found {found}")]
    DimensionMismatch {
        /// `n * (n + 1)` for an `n` coefficient system
        expected: usize,
        /// Number of entries supplied
        found: usize,
    },

    /// No usable pivot was found during elimination.
    ///
    /// Usually the degree is too high for the data: there are fewer distinct x-values
    /// than coefficients. Try again with a lower degree.
    #[error(
        "Normal equations are singular at column {column} of {size}; the data has too few distinct x-values for this degree"
    )]
    SingularSystem {
        /// Elimination step (column) at which every pivot candidate was unusable
        column: usize,
        /// Number of coefficients in the system
        size: usize,
    },

    /// A sampling range was empty, inverted, or not finite.
    #[error("Invalid sampling range: {0}")]
    InvalidRange(String),

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,
}

impl Error {
    /// Returns true if this error was caused by the caller's input rather than by the data's geometry.
    ///
    /// Every variant except [`Error::SingularSystem`] is an input error.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::SingularSystem { .. })
    }
}

/// Result type for polynomial fitting
pub type Result<T> = std::result::Result<T, Error>;
