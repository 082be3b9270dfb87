//! Quantiles from the binned CDF of a fixed-range histogram

use crate::traits::{check_arguments, QuantileEstimator};
use corr_core::{EmpiricalDistribution, Error, Result};
use corr_histogram::{FixedRangeBuilder, Histogram, HistogramBuilder, DEFAULT_BINS};
use tracing::debug;

/// Quantiles read off a fixed-range histogram
///
/// The distribution is binned, the cumulative fraction is formed from the
/// in-range bin counts, and the quantile is interpolated linearly inside the
/// bin where the CDF crosses `p`. Values outside the histogram range do not
/// contribute. Resolution is limited by the bin width, so the result may
/// differ from [`LinearInterpolation`](super::LinearInterpolation) by up to
/// one bin.
#[derive(Debug, Clone, Copy)]
pub struct HistogramQuantile {
    builder: FixedRangeBuilder,
}

impl HistogramQuantile {
    /// Histogram estimator with `num_bins` bins over `[min, max]`
    pub fn new(num_bins: usize, min: f64, max: f64) -> Result<Self> {
        Ok(Self {
            builder: FixedRangeBuilder::new(num_bins, min, max)?,
        })
    }

    /// Histogram estimator over the correlation range `[-1, 1]`
    pub fn correlation(num_bins: usize) -> Result<Self> {
        Ok(Self {
            builder: FixedRangeBuilder::correlation(num_bins)?,
        })
    }

    pub fn builder(&self) -> &FixedRangeBuilder {
        &self.builder
    }

    /// Quantile from an already built histogram
    ///
    /// Returns `None` if no value fell inside the histogram range.
    pub fn quantile_from_histogram(histogram: &Histogram, p: f64) -> Option<f64> {
        let cdf = histogram.cumulative()?;
        // Last edge with CDF <= p; cdf[0] = 0 < p and cdf[len] = 1 > p
        let ibin = cdf.partition_point(|&c| c <= p).saturating_sub(1);
        let ibin = ibin.min(histogram.len() - 1);
        let bin = &histogram.bins()[ibin];
        let mass = cdf[ibin + 1] - cdf[ibin];
        if mass > 0.0 {
            Some(bin.left + bin.width() * (p - cdf[ibin]) / mass)
        } else {
            Some(bin.left)
        }
    }
}

impl Default for HistogramQuantile {
    fn default() -> Self {
        Self {
            builder: FixedRangeBuilder::correlation(DEFAULT_BINS)
                .expect("default histogram range is valid"),
        }
    }
}

impl QuantileEstimator for HistogramQuantile {
    fn quantiles(
        &self,
        distribution: &EmpiricalDistribution,
        probabilities: &[f64],
    ) -> Result<Vec<f64>> {
        check_arguments(distribution, probabilities)?;

        let histogram = self.builder.build(distribution.values())?;
        if histogram.underflow() + histogram.overflow() > 0 {
            debug!(
                underflow = histogram.underflow(),
                overflow = histogram.overflow(),
                "values outside histogram range are ignored"
            );
        }

        probabilities
            .iter()
            .map(|&p| {
                Self::quantile_from_histogram(&histogram, p).ok_or(Error::InsufficientData {
                    expected: 1,
                    actual: 0,
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "Histogram CDF"
    }
}
