//! Core traits for quantile estimation

use crate::probability::{validate_probability, ProbabilityPair};
use corr_core::{EmpiricalDistribution, Error, Result};

/// Estimates quantiles of an empirical distribution
///
/// Implementors only provide [`quantiles`](Self::quantiles); the single
/// quantile and interval helpers are derived from it. Every estimator must be
/// monotone: for `p1 <= p2` the returned quantiles satisfy `q(p1) <= q(p2)`.
pub trait QuantileEstimator: Clone + Send + Sync {
    /// Estimate the quantiles at each probability in `probabilities`
    ///
    /// # Errors
    /// * [`Error::InvalidProbability`] if any probability is outside (0, 1)
    /// * [`Error::InsufficientData`] if the distribution is empty
    fn quantiles(&self, distribution: &EmpiricalDistribution, probabilities: &[f64])
        -> Result<Vec<f64>>;

    /// Estimator name for diagnostics
    fn name(&self) -> &'static str;

    /// Estimate a single quantile
    fn quantile(&self, distribution: &EmpiricalDistribution, p: f64) -> Result<f64> {
        let q = self.quantiles(distribution, &[p])?;
        Ok(q[0])
    }

    /// Estimate the bounds of a two-sided interval
    fn interval(
        &self,
        distribution: &EmpiricalDistribution,
        probabilities: ProbabilityPair,
    ) -> Result<(f64, f64)> {
        let q = self.quantiles(distribution, &probabilities.as_array())?;
        Ok((q[0], q[1]))
    }
}

/// Shared argument checks for [`QuantileEstimator::quantiles`] implementations
pub(crate) fn check_arguments(
    distribution: &EmpiricalDistribution,
    probabilities: &[f64],
) -> Result<()> {
    for &p in probabilities {
        validate_probability(p)?;
    }
    if distribution.is_empty() {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    Ok(())
}
