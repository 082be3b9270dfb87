//! Case resampling of paired data
//!
//! Each replica draws `n` indices uniformly with replacement from `[0, n)`,
//! gathers both coordinates at those indices and evaluates the statistic.
//! Index and gather buffers are allocated once per run and reused across
//! replicas.

use corr_core::{
    CorrelationEstimator, EmpiricalDistribution, Error, PairedSample, Pearson, RandomSource,
    Result,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

/// Replicas handled by one random substream in [`BootstrapSampler::sample_parallel`]
pub const PARALLEL_CHUNK: usize = 64;

/// Default bound on consecutive degenerate draws for one replica
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// What to do with a replica whose gathered coordinates have zero variance
///
/// Such replicas are possible whenever all drawn indices point at cases
/// sharing one x (or one z) value, which is likely for very small `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReplicaPolicy {
    /// Fail the whole run at the first degenerate replica
    Abort,
    /// Discard and redraw, failing after `max_attempts` consecutive
    /// degenerate draws for the same replica
    Redraw { max_attempts: usize },
}

impl Default for DegenerateReplicaPolicy {
    fn default() -> Self {
        Self::Redraw {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Empirical distribution plus bookkeeping from one sampling run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingOutcome {
    /// One statistic value per accepted replica
    pub distribution: EmpiricalDistribution,
    /// Degenerate replicas that were discarded and redrawn
    pub discarded: usize,
}

impl SamplingOutcome {
    /// Concatenate a partial outcome into this one
    pub fn merge(&mut self, other: SamplingOutcome) {
        self.distribution.merge(other.distribution);
        self.discarded += other.discarded;
    }
}

/// Draws bootstrap replicas and evaluates the statistic on each
#[derive(Debug, Clone)]
pub struct BootstrapSampler<E = Pearson> {
    estimator: E,
    n_resamples: usize,
    policy: DegenerateReplicaPolicy,
}

impl BootstrapSampler<Pearson> {
    /// Sampler for the Pearson correlation with `n_resamples` replicas
    pub fn pearson(n_resamples: usize) -> Self {
        Self::new(Pearson).with_resamples(n_resamples)
    }
}

impl<E: CorrelationEstimator> BootstrapSampler<E> {
    /// Create a sampler for `estimator` with default settings
    pub fn new(estimator: E) -> Self {
        Self {
            estimator,
            n_resamples: crate::api::DEFAULT_RESAMPLES,
            policy: DegenerateReplicaPolicy::default(),
        }
    }

    /// Set the number of bootstrap replicas
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        assert!(n_resamples > 0, "Number of resamples must be positive");
        self.n_resamples = n_resamples;
        self
    }

    /// Set the degenerate replica policy
    pub fn with_policy(mut self, policy: DegenerateReplicaPolicy) -> Self {
        if let DegenerateReplicaPolicy::Redraw { max_attempts } = policy {
            assert!(max_attempts > 0, "Redraw policy needs at least one attempt");
        }
        self.policy = policy;
        self
    }

    pub fn n_resamples(&self) -> usize {
        self.n_resamples
    }

    pub fn policy(&self) -> DegenerateReplicaPolicy {
        self.policy
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Draw all replicas from a single, sequentially consumed random stream
    ///
    /// For a given generator state the result is fully deterministic.
    ///
    /// # Errors
    /// [`Error::DegenerateInput`] if the pair has fewer than two cases or zero
    /// variance in either coordinate, if a degenerate replica is hit under
    /// [`DegenerateReplicaPolicy::Abort`], or if the redraw budget runs out.
    #[instrument(skip(self, pair, rng), fields(n = pair.len(), n_resamples = self.n_resamples))]
    pub fn sample<R>(&self, pair: &PairedSample, rng: &mut R) -> Result<SamplingOutcome>
    where
        R: RandomSource + ?Sized,
    {
        self.check_pair(pair)?;
        debug!("Drawing {} bootstrap replicas sequentially", self.n_resamples);

        let outcome = self.run_replicas(pair, 0, self.n_resamples, rng)?;
        report_discarded(&outcome);
        Ok(outcome)
    }

    /// Draw replicas in parallel from pre-partitioned substreams
    ///
    /// Replicas are split into chunks of [`PARALLEL_CHUNK`]; chunk `k` draws
    /// from a ChaCha8 generator seeded with `seed` on stream `k`. Partial
    /// distributions are concatenated in chunk order, so the result depends
    /// only on `seed`, never on thread scheduling.
    #[instrument(skip(self, pair), fields(n = pair.len(), n_resamples = self.n_resamples))]
    pub fn sample_parallel(&self, pair: &PairedSample, seed: u64) -> Result<SamplingOutcome> {
        self.check_pair(pair)?;

        let n_chunks = self.n_resamples.div_ceil(PARALLEL_CHUNK);
        debug!("Drawing {} bootstrap replicas in {} substreams", self.n_resamples, n_chunks);

        let partials: Vec<SamplingOutcome> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let first = chunk * PARALLEL_CHUNK;
                let count = PARALLEL_CHUNK.min(self.n_resamples - first);
                let mut rng = substream(seed, chunk);
                self.run_replicas(pair, first, count, &mut rng)
            })
            .collect::<Result<_>>()?;

        let mut outcome = SamplingOutcome {
            distribution: EmpiricalDistribution::with_capacity(self.n_resamples),
            discarded: 0,
        };
        for partial in partials {
            outcome.merge(partial);
        }
        report_discarded(&outcome);
        Ok(outcome)
    }

    /// Reject samples the statistic cannot be evaluated on, before any draws
    fn check_pair(&self, pair: &PairedSample) -> Result<f64> {
        if pair.len() < 2 {
            return Err(Error::too_short(pair.len(), "bootstrap sample"));
        }
        self.estimator.correlation(pair.x(), pair.y())
    }

    /// Run `count` replicas numbered from `first`, all drawing from `rng`
    fn run_replicas<R>(
        &self,
        pair: &PairedSample,
        first: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<SamplingOutcome>
    where
        R: RandomSource + ?Sized,
    {
        let n = pair.len();
        let mut indices = vec![0usize; n];
        let mut xs = Vec::with_capacity(n);
        let mut zs = Vec::with_capacity(n);
        let mut outcome = SamplingOutcome {
            distribution: EmpiricalDistribution::with_capacity(count),
            discarded: 0,
        };

        for replica in first..first + count {
            let mut attempts = 0;
            loop {
                rng.fill_indices(n, &mut indices);
                pair.gather_into(&indices, &mut xs, &mut zs);

                match self.estimator.correlation(&xs, &zs) {
                    Ok(r) => {
                        outcome.distribution.push(r);
                        break;
                    }
                    Err(e) if e.is_degenerate() => {
                        attempts += 1;
                        match self.policy {
                            DegenerateReplicaPolicy::Abort => {
                                return Err(Error::DegenerateInput(format!(
                                    "bootstrap replica {replica} has zero variance"
                                )));
                            }
                            DegenerateReplicaPolicy::Redraw { max_attempts }
                                if attempts >= max_attempts =>
                            {
                                return Err(Error::DegenerateInput(format!(
                                    "bootstrap replica {replica} degenerate after {attempts} draws"
                                )));
                            }
                            DegenerateReplicaPolicy::Redraw { .. } => {
                                outcome.discarded += 1;
                                trace!(replica, attempts, "redrawing degenerate replica");
                            }
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(outcome)
    }
}

/// Independent generator for substream `stream` of `seed`
pub fn substream(seed: u64, stream: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream as u64);
    rng
}

fn report_discarded(outcome: &SamplingOutcome) {
    if outcome.discarded > 0 {
        warn!(
            discarded = outcome.discarded,
            accepted = outcome.distribution.len(),
            "discarded degenerate bootstrap replicas"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn linear_pair(n: usize) -> PairedSample {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let z: Vec<f64> = x.iter().map(|v| 0.5 * v + (v * 1.3).sin()).collect();
        PairedSample::new(x, z).unwrap()
    }

    #[test]
    fn test_sampler_construction() {
        let sampler = BootstrapSampler::pearson(500)
            .with_policy(DegenerateReplicaPolicy::Abort);
        assert_eq!(sampler.n_resamples(), 500);
        assert_eq!(sampler.policy(), DegenerateReplicaPolicy::Abort);
        assert_eq!(sampler.estimator().name(), "Pearson");
    }

    #[test]
    fn test_invalid_builder_inputs() {
        let result = std::panic::catch_unwind(|| BootstrapSampler::pearson(0));
        assert!(result.is_err());

        let result = std::panic::catch_unwind(|| {
            BootstrapSampler::pearson(10)
                .with_policy(DegenerateReplicaPolicy::Redraw { max_attempts: 0 })
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_count_and_bounds() {
        let pair = linear_pair(20);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let outcome = BootstrapSampler::pearson(300).sample(&pair, &mut rng).unwrap();
        assert_eq!(outcome.distribution.len(), 300);
        assert!(outcome
            .distribution
            .values()
            .iter()
            .all(|r| (-1.0..=1.0).contains(r)));
    }

    #[test]
    fn test_sequential_reproducible() {
        let pair = linear_pair(12);
        let sampler = BootstrapSampler::pearson(50);
        let a = sampler.sample(&pair, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = sampler.sample(&pair, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a.distribution, b.distribution);
    }

    #[test]
    fn test_parallel_deterministic_and_complete() {
        let pair = linear_pair(25);
        let sampler = BootstrapSampler::pearson(1000);
        let a = sampler.sample_parallel(&pair, 42).unwrap();
        let b = sampler.sample_parallel(&pair, 42).unwrap();
        assert_eq!(a.distribution.len(), 1000);
        assert_eq!(a.distribution, b.distribution);

        let c = sampler.sample_parallel(&pair, 43).unwrap();
        assert_ne!(a.distribution, c.distribution);
    }

    #[test]
    fn test_parallel_chunk_matches_substream() {
        // The first chunk of a parallel run is a sequential run on substream 0
        let pair = linear_pair(10);
        let sampler = BootstrapSampler::pearson(PARALLEL_CHUNK);
        let parallel = sampler.sample_parallel(&pair, 5).unwrap();
        let sequential = sampler.sample(&pair, &mut substream(5, 0)).unwrap();
        assert_eq!(parallel.distribution, sequential.distribution);
    }

    #[test]
    fn test_too_small_sample() {
        let pair = PairedSample::new(vec![1.0], vec![2.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let sampler = BootstrapSampler::pearson(10);
        assert!(sampler.sample(&pair, &mut rng).unwrap_err().is_degenerate());
        assert!(sampler.sample_parallel(&pair, 0).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_degenerate_pair_rejected_before_drawing() {
        let pair = PairedSample::new(vec![1.0, 2.0, 3.0], vec![4.0; 3]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let untouched = rng.clone();
        let err = BootstrapSampler::pearson(10).sample(&pair, &mut rng).unwrap_err();
        assert!(err.is_degenerate());
        assert_eq!(rng, untouched);
    }

    #[test]
    fn test_redraw_recovers_two_point_sample() {
        // With n = 2 half of all replicas repeat one case and are degenerate
        let pair = PairedSample::new(vec![0.0, 1.0], vec![0.0, 2.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let outcome = BootstrapSampler::pearson(200).sample(&pair, &mut rng).unwrap();
        assert_eq!(outcome.distribution.len(), 200);
        assert!(outcome.discarded > 0);
        assert!(outcome.distribution.values().iter().all(|&r| (r - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_abort_policy_fails_on_degenerate_replica() {
        let pair = PairedSample::new(vec![0.0, 1.0], vec![0.0, 2.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let sampler = BootstrapSampler::pearson(200).with_policy(DegenerateReplicaPolicy::Abort);
        assert!(sampler.sample(&pair, &mut rng).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_redraw_budget_exhausted() {
        // x is constant apart from one case; about a third of replicas miss it
        let mut x = vec![0.0; 200];
        x[0] = 1.0;
        let z: Vec<f64> = (0..200).map(|i| i as f64).collect();
        let pair = PairedSample::new(x, z).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sampler = BootstrapSampler::pearson(1000)
            .with_policy(DegenerateReplicaPolicy::Redraw { max_attempts: 1 });
        assert!(sampler.sample(&pair, &mut rng).unwrap_err().is_degenerate());
    }
}
