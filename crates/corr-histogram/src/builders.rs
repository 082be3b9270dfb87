//! Histogram building strategies

use crate::types::{Histogram, HistogramBin};
use corr_core::{Error, Result};

/// Trait for building histograms from sample data
pub trait HistogramBuilder {
    /// Build a histogram from the given sample
    fn build(&self, sample: &[f64]) -> Result<Histogram>;

    /// Get the target number of bins (if known)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}

/// Fixed-range, equal-width histogram builder
///
/// The range does not adapt to the data: values outside `[min, max]` are
/// tallied as underflow/overflow. This is what a correlation histogram
/// wants, since every coefficient lives in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRangeBuilder {
    num_bins: usize,
    min: f64,
    max: f64,
}

impl FixedRangeBuilder {
    /// Create a builder with `num_bins` bins spanning `[min, max]`
    pub fn new(num_bins: usize, min: f64, max: f64) -> Result<Self> {
        if num_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidParameter(format!(
                "histogram range [{min}, {max}] must be finite and non-empty"
            )));
        }
        Ok(Self { num_bins, min, max })
    }

    /// Builder covering the full range of a correlation coefficient
    pub fn correlation(num_bins: usize) -> Result<Self> {
        Self::new(num_bins, -1.0, 1.0)
    }

    /// Width of each bin
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.num_bins as f64
    }

    fn empty_bins(&self) -> Vec<HistogramBin> {
        let width = self.bin_width();
        (0..self.num_bins)
            .map(|i| {
                let left = self.min + i as f64 * width;
                let right = if i == self.num_bins - 1 {
                    self.max
                } else {
                    self.min + (i + 1) as f64 * width
                };
                HistogramBin::new(left, right, 0)
            })
            .collect()
    }
}

impl HistogramBuilder for FixedRangeBuilder {
    fn build(&self, sample: &[f64]) -> Result<Histogram> {
        let template = Histogram::from_parts(self.empty_bins(), 0, 0);
        let mut underflow = 0;
        let mut overflow = 0;
        let mut counts = vec![0usize; self.num_bins];

        for &value in sample {
            match template.find_bin(value) {
                Some(idx) => counts[idx] += 1,
                None if value < self.min => underflow += 1,
                None => overflow += 1,
            }
        }

        let bins = template
            .bins()
            .iter()
            .zip(counts)
            .map(|(bin, count)| HistogramBin::new(bin.left, bin.right, count))
            .collect();
        Ok(Histogram::from_parts(bins, underflow, overflow))
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.num_bins)
    }
}
