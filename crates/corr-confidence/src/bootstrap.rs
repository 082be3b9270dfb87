//! Percentile bootstrap engine for correlation intervals
//!
//! [`Bootstrap`] ties a [`BootstrapSampler`] to a [`QuantileEstimator`]:
//! replicas of the paired sample are drawn, the statistic is evaluated on
//! each, and the interval bounds are read off the resulting empirical
//! distribution at the configured tail probabilities.

use crate::config::BootstrapConfig;
use crate::sampler::{BootstrapSampler, DegenerateReplicaPolicy, SamplingOutcome};
use crate::ConfidenceInterval;
use corr_core::{
    CorrelationEstimator, EmpiricalDistribution, PairedSample, Pearson, RandomSource, Result,
};
use corr_histogram::{FixedRangeBuilder, Histogram, HistogramBuilder};
use corr_quantile::{AnyQuantileEstimator, ProbabilityPair, QuantileEstimator};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, instrument};

/// Result of a bootstrap run
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    /// Correlation of the original pair
    pub estimate: f64,
    /// Percentile interval with the estimate attached
    pub interval: ConfidenceInterval,
    /// One correlation per accepted replica, in draw order
    pub distribution: EmpiricalDistribution,
    /// Number of bootstrap resamples performed
    pub n_resamples: usize,
    /// Degenerate replicas discarded and redrawn
    pub discarded: usize,
    /// Seed of the replica stream, when the engine chose or was given one
    pub seed: Option<u64>,
    /// Name of the quantile estimator that produced the bounds
    pub quantile_estimator: &'static str,
    /// Time taken for bootstrap (if measured)
    pub bootstrap_time_ms: Option<u64>,
}

impl BootstrapResult {
    /// Bin the replica correlations over `[-1, 1]`
    pub fn histogram(&self, num_bins: usize) -> Result<Histogram> {
        FixedRangeBuilder::correlation(num_bins)?.build(self.distribution.values())
    }

    /// Standard deviation of the replica correlations
    pub fn standard_error(&self) -> Option<f64> {
        self.distribution.std_dev()
    }
}

/// Bootstrap engine for a correlation statistic
#[derive(Debug, Clone)]
pub struct Bootstrap<E = Pearson, Q = AnyQuantileEstimator> {
    sampler: BootstrapSampler<E>,
    quantile: Q,
    probabilities: ProbabilityPair,
    seed: Option<u64>,
    parallel: bool,
}

impl Bootstrap<Pearson, AnyQuantileEstimator> {
    /// Pearson correlation with linear-interpolation bounds
    pub fn pearson() -> Self {
        Self::new(Pearson, AnyQuantileEstimator::default())
    }

    /// Build an engine from a deserialized configuration
    ///
    /// # Errors
    /// Whatever [`BootstrapConfig::validate`] reports.
    pub fn from_config(config: &BootstrapConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::new(Pearson, AnyQuantileEstimator::from_method(config.quantile)?)
            .with_resamples(config.n_resamples)
            .with_probabilities(config.probabilities)
            .with_policy(config.policy)
            .with_parallel(config.parallel);
        engine.seed = config.seed;
        Ok(engine)
    }
}

impl<E, Q> Bootstrap<E, Q>
where
    E: CorrelationEstimator,
    Q: QuantileEstimator,
{
    /// Create a new bootstrap engine
    pub fn new(estimator: E, quantile: Q) -> Self {
        Self {
            sampler: BootstrapSampler::new(estimator),
            quantile,
            probabilities: ProbabilityPair::default(),
            seed: None,
            parallel: false,
        }
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        self.sampler = self.sampler.with_resamples(n_resamples);
        self
    }

    /// Set the tail probabilities of the interval
    pub fn with_probabilities(mut self, probabilities: ProbabilityPair) -> Self {
        self.probabilities = probabilities;
        self
    }

    /// Set a central interval with the given confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.probabilities = ProbabilityPair::from_confidence_level(confidence_level)
            .unwrap_or_else(|_| panic!("Confidence level must be in (0, 1)"));
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the degenerate replica policy
    pub fn with_policy(mut self, policy: DegenerateReplicaPolicy) -> Self {
        self.sampler = self.sampler.with_policy(policy);
        self
    }

    /// Draw replicas on the rayon pool in seeded substreams
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the quantile estimator
    pub fn with_quantile<Q2: QuantileEstimator>(self, quantile: Q2) -> Bootstrap<E, Q2> {
        Bootstrap {
            sampler: self.sampler,
            quantile,
            probabilities: self.probabilities,
            seed: self.seed,
            parallel: self.parallel,
        }
    }

    pub fn sampler(&self) -> &BootstrapSampler<E> {
        &self.sampler
    }

    pub fn probabilities(&self) -> ProbabilityPair {
        self.probabilities
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Interval from a seeded ChaCha8 stream
    ///
    /// Without a seed one is drawn from the thread RNG and reported in the
    /// result, so any run can be replayed.
    #[instrument(
        skip(self, pair),
        fields(n = pair.len(), n_resamples = self.sampler.n_resamples(), parallel = self.parallel)
    )]
    pub fn confidence_interval(&self, pair: &PairedSample) -> Result<BootstrapResult> {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let start_time = Instant::now();

        let outcome = if self.parallel {
            self.sampler.sample_parallel(pair, seed)?
        } else {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            self.sampler.sample(pair, &mut rng)?
        };

        self.finish(pair, outcome, Some(seed), start_time)
    }

    /// Interval from a caller-supplied random stream, consumed sequentially
    #[instrument(
        skip(self, pair, rng),
        fields(n = pair.len(), n_resamples = self.sampler.n_resamples())
    )]
    pub fn confidence_interval_with_rng<R>(
        &self,
        pair: &PairedSample,
        rng: &mut R,
    ) -> Result<BootstrapResult>
    where
        R: RandomSource + ?Sized,
    {
        let start_time = Instant::now();
        let outcome = self.sampler.sample(pair, rng)?;
        self.finish(pair, outcome, None, start_time)
    }

    fn finish(
        &self,
        pair: &PairedSample,
        outcome: SamplingOutcome,
        seed: Option<u64>,
        start_time: Instant,
    ) -> Result<BootstrapResult> {
        let estimate = self.sampler.estimator().correlation(pair.x(), pair.y())?;
        let (lower, upper) = self.quantile.interval(&outcome.distribution, self.probabilities)?;
        let interval = ConfidenceInterval::new(lower, upper, estimate, self.probabilities);

        debug!(
            estimate,
            lower,
            upper,
            estimator = self.quantile.name(),
            "bootstrap interval computed"
        );

        Ok(BootstrapResult {
            estimate,
            interval,
            n_resamples: outcome.distribution.len(),
            distribution: outcome.distribution,
            discarded: outcome.discarded,
            seed,
            quantile_estimator: self.quantile.name(),
            bootstrap_time_ms: Some(start_time.elapsed().as_millis() as u64),
        })
    }
}

impl Default for Bootstrap<Pearson, AnyQuantileEstimator> {
    fn default() -> Self {
        Self::pearson()
    }
}
