//! Validated tail probabilities for two-sided intervals

use corr_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Check that a single probability lies strictly inside (0, 1)
pub fn validate_probability(p: f64) -> Result<f64> {
    if p > 0.0 && p < 1.0 {
        Ok(p)
    } else {
        Err(Error::InvalidProbability { lower: p, upper: p })
    }
}

/// Pair of tail probabilities `0 < lower < upper < 1`
///
/// Deserialization goes through the same validation as [`ProbabilityPair::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct ProbabilityPair {
    lower: f64,
    upper: f64,
}

impl ProbabilityPair {
    /// The 2.5% / 97.5% pair of a 95% two-sided interval
    pub const NINETY_FIVE: Self = Self {
        lower: 0.025,
        upper: 0.975,
    };

    /// Create a validated pair
    ///
    /// # Errors
    /// [`Error::InvalidProbability`] unless `0 < lower < upper < 1`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        // Written so that NaN fails every comparison
        if lower > 0.0 && upper < 1.0 && lower < upper {
            Ok(Self { lower, upper })
        } else {
            Err(Error::InvalidProbability { lower, upper })
        }
    }

    /// Symmetric pair for a two-sided interval at `confidence_level`
    ///
    /// ```rust
    /// use corr_quantile::ProbabilityPair;
    ///
    /// let pair = ProbabilityPair::from_confidence_level(0.90).unwrap();
    /// assert!((pair.lower() - 0.05).abs() < 1e-12);
    /// assert!((pair.upper() - 0.95).abs() < 1e-12);
    /// ```
    pub fn from_confidence_level(confidence_level: f64) -> Result<Self> {
        let tail = (1.0 - confidence_level) / 2.0;
        Self::new(tail, 1.0 - tail)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Probability mass between the two quantiles
    pub fn coverage(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }
}

impl Default for ProbabilityPair {
    fn default() -> Self {
        Self::NINETY_FIVE
    }
}

impl TryFrom<(f64, f64)> for ProbabilityPair {
    type Error = Error;

    fn try_from((lower, upper): (f64, f64)) -> Result<Self> {
        Self::new(lower, upper)
    }
}

impl From<ProbabilityPair> for (f64, f64) {
    fn from(pair: ProbabilityPair) -> Self {
        (pair.lower, pair.upper)
    }
}

impl fmt::Display for ProbabilityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pairs() {
        let pair = ProbabilityPair::new(0.025, 0.975).unwrap();
        assert_eq!(pair, ProbabilityPair::default());
        assert!((pair.coverage() - 0.95).abs() < 1e-12);
        assert_eq!(pair.as_array(), [0.025, 0.975]);
    }

    #[test]
    fn test_invalid_pairs() {
        for (lo, hi) in [
            (0.975, 0.025),
            (0.5, 0.5),
            (0.0, 0.5),
            (0.5, 1.0),
            (-0.1, 0.5),
            (f64::NAN, 0.5),
            (0.1, f64::NAN),
        ] {
            match ProbabilityPair::new(lo, hi) {
                Err(Error::InvalidProbability { .. }) => {}
                other => panic!("({lo}, {hi}) gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_confidence_level() {
        assert!(ProbabilityPair::from_confidence_level(1.0).is_err());
        assert!(ProbabilityPair::from_confidence_level(0.0).is_err());
        let pair = ProbabilityPair::from_confidence_level(0.95).unwrap();
        assert!((pair.lower() - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_single_probability() {
        assert!(validate_probability(0.5).is_ok());
        assert!(validate_probability(0.0).is_err());
        assert!(validate_probability(1.0).is_err());
        assert!(validate_probability(f64::NAN).is_err());
    }
}
