//! Fixed-range histograms for bootstrap distributions
//!
//! A bootstrap run produces a cloud of correlation coefficients. This crate
//! bins them into an equal-width histogram over a fixed range (by default
//! `[-1, 1]`), which serves two consumers:
//!
//! - renderers that draw the distribution
//! - the histogram quantile estimator, which interpolates the binned CDF
//!
//! # Example
//!
//! ```rust
//! use corr_histogram::{correlation_histogram, DEFAULT_BINS};
//!
//! let values = vec![0.61, 0.65, 0.70, 0.72, 0.74, 0.80];
//! let hist = correlation_histogram(&values, DEFAULT_BINS).unwrap();
//!
//! assert_eq!(hist.len(), DEFAULT_BINS);
//! assert_eq!(hist.in_range_count(), values.len());
//! let cdf = hist.cumulative().unwrap();
//! assert_eq!(cdf.last(), Some(&1.0));
//! ```

pub mod builders;
pub mod types;

pub use builders::{FixedRangeBuilder, HistogramBuilder};
pub use types::{Histogram, HistogramBin};

/// Default number of bins for correlation histograms
pub const DEFAULT_BINS: usize = 100;

/// Bin correlation values into `num_bins` equal bins over `[-1, 1]`
pub fn correlation_histogram(values: &[f64], num_bins: usize) -> corr_core::Result<Histogram> {
    FixedRangeBuilder::correlation(num_bins)?.build(values)
}

pub use corr_core::Result;
