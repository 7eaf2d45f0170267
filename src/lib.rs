//! # Approximator
//! ## Least-squares polynomials, one small solver at a time
//!
//! Give it a handful of `(x, y)` points and a degree, and it hands back the polynomial
//! that minimises the sum of squared vertical distances to those points.
//!
//! ```rust
//! let data: [(f64, f64); 4] = [(0.0, 1.0), (1.0, 2.9), (2.0, 9.2), (3.0, 19.1)];
//!
//! let coefficients = approximator::fit(&data, 2).expect("Failed to fit");
//! let y = approximator::evaluate(&coefficients, 1.5);
//! assert!((y - 5.5).abs() < 0.5);
//! ```
//!
//! # Core Concepts
//! - A [`Polynomial`] is a mathematical function `y(x) = c₀ + c₁x + … + c_d·x^d`.
//!     - Coefficients are always stored lowest degree first.
//!     - It is evaluated with Horner's scheme, see [`evaluate`].
//! - A [`CurveFit`] is a polynomial fitted to a set of data points.
//!     - It keeps the data, so residuals and R² can be inspected afterwards.
//!     - It is only really meaningful within the `x` range of that data.
//! - The **degree** is the highest power of `x`. A fit of degree `d` needs at least
//!   `d + 1` distinct x-values, otherwise the system is singular.
//!
//! # Implementation Details
//!
//! Fitting is done in two steps:
//! - [`normal::build`] condenses the samples into power sums and lays out the normal
//!   equations `XᵀX · c = Xᵀy` as an augmented matrix.
//! - [`solver::solve`] runs Gaussian elimination with partial pivoting, then back-substitution.
//!   It reports a [`solver::Conditioning`] so you can tell when the answer should not be trusted.
//!
//! Matrices are stored with `nalgebra`. Everything is generic over [`value::Value`],
//! which covers `f64` and `f32`.
//!
//! # Testing utilities
//!
//! Assertion macros for comparing floats and checking fits are available in [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // Index loops read better for matrix code
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

#[cfg(feature = "sampling")]
#[cfg_attr(docsrs, doc(cfg(feature = "sampling")))]
pub mod sampling;

pub mod display;
pub mod error;
pub mod normal;
pub mod solver;
pub mod statistics;
pub mod value;

mod fit;
mod polynomial;

pub use fit::*;
pub use polynomial::{evaluate, Polynomial};

pub use nalgebra;
