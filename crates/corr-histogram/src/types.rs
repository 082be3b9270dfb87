//! Core types for histogram representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bin in a histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub left: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub right: f64,
    /// Number of values in this bin
    pub count: usize,
}

impl HistogramBin {
    /// Create a new histogram bin
    pub fn new(left: f64, right: f64, count: usize) -> Self {
        Self { left, right, count }
    }

    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin (right edge exclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value < self.right
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}): count={}", self.left, self.right, self.count)
    }
}

/// Equal-width histogram over a fixed range
///
/// Values below the range land in `underflow`, values above it (or NaN) in
/// `overflow`; neither takes part in the cumulative distribution. The last
/// bin includes its right edge so that a value exactly at `max` is counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    underflow: usize,
    overflow: usize,
}

impl Histogram {
    pub(crate) fn from_parts(bins: Vec<HistogramBin>, underflow: usize, overflow: usize) -> Self {
        Self {
            bins,
            underflow,
            overflow,
        }
    }

    /// Get the bins
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Values that fell below the first bin
    pub fn underflow(&self) -> usize {
        self.underflow
    }

    /// Values that fell above the last bin
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Number of values inside the range
    pub fn in_range_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Number of values filled, including under/overflow
    pub fn total_count(&self) -> usize {
        self.in_range_count() + self.underflow + self.overflow
    }

    /// Lower edge of the range
    pub fn min(&self) -> f64 {
        self.bins.first().map_or(0.0, |bin| bin.left)
    }

    /// Upper edge of the range
    pub fn max(&self) -> f64 {
        self.bins.last().map_or(0.0, |bin| bin.right)
    }

    /// Get the maximum count in any bin
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Find which bin contains a given value
    pub fn find_bin(&self, value: f64) -> Option<usize> {
        let last = self.bins.last()?;
        if value == last.right {
            return Some(self.bins.len() - 1);
        }
        let (min, max) = (self.min(), self.max());
        if !(value >= min && value < max) {
            return None;
        }
        let width = last.width();
        let idx = ((value - min) / width) as usize;
        // Rounding at a bin edge can land one bin off
        let idx = idx.min(self.bins.len() - 1);
        if self.bins[idx].contains(value) {
            Some(idx)
        } else if idx > 0 && self.bins[idx - 1].contains(value) {
            Some(idx - 1)
        } else {
            self.bins.get(idx + 1).filter(|b| b.contains(value)).map(|_| idx + 1)
        }
    }

    /// Get counts as a vector
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Get bin centers as a vector
    pub fn centers(&self) -> Vec<f64> {
        self.bins.iter().map(HistogramBin::center).collect()
    }

    /// Get bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|bin| bin.left).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.right);
        }
        edges
    }

    /// Normalized cumulative distribution at the bin edges
    ///
    /// Entry `k` is the fraction of in-range values lying in bins `0..k`, so
    /// the result has `len() + 1` entries starting at 0 and ending at 1.
    /// Returns `None` when no value fell inside the range.
    pub fn cumulative(&self) -> Option<Vec<f64>> {
        let total = self.in_range_count();
        if total == 0 {
            return None;
        }
        let mut running = 0usize;
        let mut cdf = Vec::with_capacity(self.bins.len() + 1);
        cdf.push(0.0);
        for bin in &self.bins {
            running += bin.count;
            cdf.push(running as f64 / total as f64);
        }
        Some(cdf)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, range=[{:.3}, {:.3}], underflow={}, overflow={})",
            self.len(),
            self.total_count(),
            self.min(),
            self.max(),
            self.underflow,
            self.overflow
        )
    }
}
