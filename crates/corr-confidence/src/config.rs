//! Serializable bootstrap configuration

use crate::api::{DEFAULT_PROBABILITIES, DEFAULT_RESAMPLES};
use crate::sampler::DegenerateReplicaPolicy;
use corr_core::{Error, Result};
use corr_quantile::{ProbabilityPair, QuantileMethod};
use serde::{Deserialize, Serialize};

/// Settings for one bootstrap run
///
/// Missing fields take their defaults when deserialized. The builder
/// methods on [`crate::Bootstrap`] panic on invalid values; a config read
/// from disk is checked with [`BootstrapConfig::validate`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of bootstrap replicas `B`
    pub n_resamples: usize,
    /// Tail probabilities the interval bounds are read at
    pub probabilities: ProbabilityPair,
    /// Seed of the replica stream; drawn from the thread RNG when absent
    pub seed: Option<u64>,
    /// Handling of zero-variance replicas
    pub policy: DegenerateReplicaPolicy,
    /// Quantile estimator for the bounds
    pub quantile: QuantileMethod,
    /// Draw replicas on the rayon pool from per-chunk substreams
    pub parallel: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        let (lower, upper) = DEFAULT_PROBABILITIES;
        Self {
            n_resamples: DEFAULT_RESAMPLES,
            probabilities: ProbabilityPair::new(lower, upper)
                .unwrap_or(ProbabilityPair::NINETY_FIVE),
            seed: None,
            policy: DegenerateReplicaPolicy::default(),
            quantile: QuantileMethod::default(),
            parallel: false,
        }
    }
}

impl BootstrapConfig {
    /// Check the values that the type system does not
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] for zero resamples, a redraw policy without
    /// attempts or a histogram estimator without bins.
    pub fn validate(&self) -> Result<()> {
        if self.n_resamples == 0 {
            return Err(Error::InvalidParameter(
                "number of resamples must be positive".to_string(),
            ));
        }
        if let DegenerateReplicaPolicy::Redraw { max_attempts: 0 } = self.policy {
            return Err(Error::InvalidParameter(
                "redraw policy needs at least one attempt".to_string(),
            ));
        }
        if let QuantileMethod::Histogram { bins: 0 } = self.quantile {
            return Err(Error::InvalidParameter(
                "histogram quantile needs at least one bin".to_string(),
            ));
        }
        Ok(())
    }
}
