//! Synthetic data for trying out fits.
//!
//! [`ScatterSampler`] scatters points around a reference curve: x-values are drawn
//! uniformly from a range, and each `y = f(x)` is pushed up or down by a uniform offset.
//!
//! ```rust
//! # use approximator::{sampling::ScatterSampler, CurveFit};
//! let data = ScatterSampler::<f64>::new(0.0..=10.0, -1.0..=1.0, 50)
//!     .with_seed(7)
//!     .sample(|x| 3.0 * x - 2.0)
//!     .unwrap();
//!
//! let fit = CurveFit::new(data, 1).unwrap();
//! assert!((fit.coefficients()[1] - 3.0).abs() < 0.2);
//! ```
use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand_distr::{uniform::SampleUniform, Distribution, Uniform};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Draws random points scattered around a reference curve.
///
/// - `x ~ U(x_range)`
/// - `y = f(x) + U(y_offset)`
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSampler<T: Value = f64> {
    /// Range the x-values are drawn from.
    pub x_range: RangeInclusive<T>,

    /// Range of the vertical offset added to each point.
    pub y_offset: RangeInclusive<T>,

    /// Number of points to draw.
    pub count: usize,

    /// Fixes the RNG seed for reproducibility.
    /// If not provided, a system RNG will be used each run.
    pub seed: Option<u64>,
}

impl<T: Value + SampleUniform> ScatterSampler<T> {
    /// Creates a sampler drawing `count` points, seeded from the system RNG.
    pub fn new(x_range: RangeInclusive<T>, y_offset: RangeInclusive<T>, count: usize) -> Self {
        Self {
            x_range,
            y_offset,
            count,
            seed: None,
        }
    }

    /// Fixes the seed, so repeated calls to [`ScatterSampler::sample`] return the same points.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draws the points, evaluating `f` at each x-value.
    ///
    /// Points are returned in the order they were drawn; they are not sorted by x.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if either range is reversed or not finite.
    pub fn sample(&self, f: impl Fn(T) -> T) -> Result<Vec<(T, T)>> {
        let x_dist = uniform("x_range", &self.x_range)?;
        let offset_dist = uniform("y_offset", &self.y_offset)?;

        let mut rng = match self.seed {
            Some(seed) => rand::rngs::SmallRng::seed_from_u64(seed),
            None => rand::rngs::SmallRng::from_rng(&mut rand::rng()),
        };

        let points: Vec<_> = (0..self.count)
            .map(|_| {
                let x = x_dist.sample(&mut rng);
                let offset = offset_dist.sample(&mut rng);
                (x, f(x) + offset)
            })
            .collect();

        log::debug!(
            "sampled {} points over {:?} (seed: {:?})",
            points.len(),
            self.x_range,
            self.seed
        );
        Ok(points)
    }
}

impl Default for ScatterSampler<f64> {
    /// Ten points over `[0, 10]`, offset by up to 20 in either direction.
    fn default() -> Self {
        Self::new(0.0..=10.0, -20.0..=20.0, 10)
    }
}

fn uniform<T: Value + SampleUniform>(name: &str, range: &RangeInclusive<T>) -> Result<Uniform<T>> {
    let (start, end) = (*range.start(), *range.end());
    if !start.is_real() || !end.is_real() || start > end {
        return Err(Error::InvalidRange(format!("{name} = {start}..={end}")));
    }

    Uniform::new_inclusive(start, end).map_err(|e| Error::InvalidRange(format!("{name}: {e}")))
}
