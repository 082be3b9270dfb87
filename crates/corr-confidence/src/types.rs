//! Common types for confidence intervals

use corr_quantile::ProbabilityPair;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate computed on the original data
    pub estimate: f64,
    /// Tail probabilities the bounds were read at
    pub probabilities: ProbabilityPair,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, estimate: f64, probabilities: ProbabilityPair) -> Self {
        debug_assert!(lower <= upper, "interval bounds out of order");
        Self {
            lower,
            upper,
            estimate,
            probabilities,
        }
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Nominal coverage, e.g. 0.95 for the 2.5% / 97.5% pair
    pub fn coverage(&self) -> f64 {
        self.probabilities.coverage()
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Bounds as a two-element array, e.g. for drawing interval markers
    pub fn bounds(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.4}, {:.4}], estimate: {:.4}",
            self.coverage() * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}
