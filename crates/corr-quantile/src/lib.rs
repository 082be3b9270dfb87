//! Quantile estimation over bootstrap distributions
//!
//! Two estimators are provided behind the [`QuantileEstimator`] trait:
//!
//! - [`LinearInterpolation`]: interpolates between order statistics of the
//!   sorted values; the estimate never leaves `[min, max]`
//! - [`HistogramQuantile`]: interpolates the CDF of a fixed-range histogram,
//!   accurate to about one bin width
//!
//! Interval bounds are requested with a validated [`ProbabilityPair`].
//!
//! # Example
//!
//! ```rust
//! use corr_core::EmpiricalDistribution;
//! use corr_quantile::{LinearInterpolation, ProbabilityPair, QuantileEstimator};
//!
//! let dist: EmpiricalDistribution = (0..1000).map(|i| -1.0 + i as f64 / 500.0).collect();
//! let (lo, hi) = LinearInterpolation
//!     .interval(&dist, ProbabilityPair::NINETY_FIVE)
//!     .unwrap();
//! assert!(lo < hi);
//! assert!((lo + 0.95).abs() < 0.01);
//! ```

pub mod estimators;
pub mod probability;
pub mod traits;

pub use estimators::{HistogramQuantile, LinearInterpolation};
pub use probability::{validate_probability, ProbabilityPair};
pub use traits::QuantileEstimator;

pub use corr_core::{Error, Result};

/// Selects a quantile estimator by name in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileMethod {
    /// [`LinearInterpolation`]
    #[default]
    Linear,
    /// [`HistogramQuantile`] with the given number of bins over `[-1, 1]`
    Histogram { bins: usize },
}

/// Estimator chosen at runtime from a [`QuantileMethod`]
#[derive(Debug, Clone, Copy)]
pub enum AnyQuantileEstimator {
    Linear(LinearInterpolation),
    Histogram(HistogramQuantile),
}

impl AnyQuantileEstimator {
    /// Build the estimator described by `method`
    pub fn from_method(method: QuantileMethod) -> Result<Self> {
        Ok(match method {
            QuantileMethod::Linear => Self::Linear(LinearInterpolation),
            QuantileMethod::Histogram { bins } => {
                Self::Histogram(HistogramQuantile::correlation(bins)?)
            }
        })
    }
}

impl Default for AnyQuantileEstimator {
    fn default() -> Self {
        Self::Linear(LinearInterpolation)
    }
}

impl QuantileEstimator for AnyQuantileEstimator {
    fn quantiles(
        &self,
        distribution: &corr_core::EmpiricalDistribution,
        probabilities: &[f64],
    ) -> Result<Vec<f64>> {
        match self {
            Self::Linear(est) => est.quantiles(distribution, probabilities),
            Self::Histogram(est) => est.quantiles(distribution, probabilities),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Linear(est) => est.name(),
            Self::Histogram(est) => est.name(),
        }
    }
}
