//! Paired datasets and the empirical distribution of a statistic

use crate::{correlation::pearson, moments, Error, Result};
use serde::{Deserialize, Serialize};

/// Two index-aligned sequences of equal length
///
/// Element `i` of `x` and element `i` of `y` belong to the same case. The
/// sequences are owned and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedSample {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PairedSample {
    /// Create a paired sample, checking that both sides have the same length
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len(), "paired sample"));
        }
        Ok(Self { x, y })
    }

    /// First coordinate
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Second coordinate
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of cases
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Pearson correlation of the two coordinates
    pub fn correlation(&self) -> Result<f64> {
        pearson(&self.x, &self.y)
    }

    /// Gather the cases at `indices` into `x_out` / `y_out`
    ///
    /// The output buffers are cleared first so they can be reused across
    /// replicas without reallocating.
    pub fn gather_into(&self, indices: &[usize], x_out: &mut Vec<f64>, y_out: &mut Vec<f64>) {
        x_out.clear();
        y_out.clear();
        x_out.extend(indices.iter().map(|&i| self.x[i]));
        y_out.extend(indices.iter().map(|&i| self.y[i]));
    }

    /// Split back into the two owned sequences
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}

/// Unordered collection of per-replica statistic values
///
/// Order carries no meaning; two distributions holding the same multiset of
/// values are interchangeable for quantile estimation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalDistribution {
    values: Vec<f64>,
}

impl EmpiricalDistribution {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty distribution with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Add one value
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Concatenate another partial distribution into this one
    pub fn merge(&mut self, other: EmpiricalDistribution) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in insertion order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values sorted ascending (NaN last)
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        (!self.is_empty()).then(|| moments::mean(&self.values))
    }

    /// Sample standard deviation of the values (the bootstrap standard error)
    pub fn std_dev(&self) -> Option<f64> {
        (self.len() >= 2).then(|| moments::std_dev(&self.values))
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for EmpiricalDistribution {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for EmpiricalDistribution {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
