//! Quantiles by linear interpolation between order statistics

use crate::traits::{check_arguments, QuantileEstimator};
use corr_core::{EmpiricalDistribution, Error, Result};

/// Linear interpolation between adjacent order statistics
///
/// For `B` sorted values `v[0] <= ... <= v[B-1]` the quantile at `p` is
///
/// ```text
/// h = (B - 1) p
/// q = v[⌊h⌋] + (h - ⌊h⌋) (v[⌊h⌋ + 1] - v[⌊h⌋])
/// ```
///
/// (Hyndman & Fan type 7). The estimate always lies in `[v[0], v[B-1]]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolation;

impl LinearInterpolation {
    pub fn new() -> Self {
        Self
    }

    /// Quantile of already sorted, finite values
    ///
    /// `sorted` must be non-empty and `p` in `[0, 1]`.
    pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
        debug_assert!(!sorted.is_empty());
        let h = (sorted.len() - 1) as f64 * p;
        let lo = (h.floor() as usize).min(sorted.len() - 1);
        let hi = (lo + 1).min(sorted.len() - 1);
        let frac = h - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

impl QuantileEstimator for LinearInterpolation {
    fn quantiles(
        &self,
        distribution: &EmpiricalDistribution,
        probabilities: &[f64],
    ) -> Result<Vec<f64>> {
        check_arguments(distribution, probabilities)?;
        if distribution.values().iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(
                "distribution contains NaN or infinite values".to_string(),
            ));
        }

        let sorted = distribution.sorted();
        Ok(probabilities
            .iter()
            .map(|&p| Self::quantile_sorted(&sorted, p))
            .collect())
    }

    fn name(&self) -> &'static str {
        "Linear interpolation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProbabilityPair;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_quantiles() {
        let dist: EmpiricalDistribution = vec![5.0, 1.0, 4.0, 2.0, 3.0].into();
        let est = LinearInterpolation::new();
        assert_relative_eq!(est.quantile(&dist, 0.5).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(est.quantile(&dist, 0.25).unwrap(), 2.0, epsilon = 1e-12);
        // h = 4 * 0.1 = 0.4 -> 1 + 0.4 * (2 - 1)
        assert_relative_eq!(est.quantile(&dist, 0.1).unwrap(), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_interval_matches_quantiles() {
        let dist: EmpiricalDistribution = (0..=100).map(|i| i as f64 / 100.0).collect();
        let (lo, hi) = LinearInterpolation
            .interval(&dist, ProbabilityPair::NINETY_FIVE)
            .unwrap();
        assert_relative_eq!(lo, 0.025, epsilon = 1e-12);
        assert_relative_eq!(hi, 0.975, epsilon = 1e-12);
    }

    #[test]
    fn test_single_value() {
        let dist: EmpiricalDistribution = vec![0.42].into();
        assert_eq!(LinearInterpolation.quantile(&dist, 0.9).unwrap(), 0.42);
    }

    #[test]
    fn test_errors() {
        let empty = EmpiricalDistribution::new();
        assert!(matches!(
            LinearInterpolation.quantile(&empty, 0.5),
            Err(Error::InsufficientData { .. })
        ));

        let dist: EmpiricalDistribution = vec![1.0, 2.0].into();
        assert!(matches!(
            LinearInterpolation.quantile(&dist, 1.5),
            Err(Error::InvalidProbability { .. })
        ));

        let nan: EmpiricalDistribution = vec![1.0, f64::NAN].into();
        assert!(matches!(
            LinearInterpolation.quantile(&nan, 0.5),
            Err(Error::InvalidInput(_))
        ));
    }
}
