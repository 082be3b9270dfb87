//! High-level API for bootstrap correlation intervals
//!
//! Thin functions over [`Bootstrap`] for the common cases.

use crate::bootstrap::{Bootstrap, BootstrapResult};
use corr_core::{Error, PairedSample, RandomSource, Result};
use corr_quantile::ProbabilityPair;

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 1000;

/// Fast number of resamples for quick estimates
pub const FAST_RESAMPLES: usize = 200;

/// High-precision number of resamples
pub const HIGH_PRECISION_RESAMPLES: usize = 10000;

/// Default tail probabilities, giving a central 95% interval
pub const DEFAULT_PROBABILITIES: (f64, f64) = (0.025, 0.975);

/// Percentile interval of the Pearson correlation from an injected stream
///
/// Uses linear interpolation between order statistics and the default
/// degenerate replica policy.
///
/// # Errors
/// [`Error::InvalidParameter`] if `n_resamples` is zero, otherwise whatever
/// [`Bootstrap::confidence_interval_with_rng`] reports.
///
/// # Example
/// ```rust
/// use corr_confidence::api::*;
/// use corr_core::PairedSample;
/// use corr_quantile::ProbabilityPair;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
/// let z: Vec<f64> = x.iter().map(|v| v + (v * 0.9).cos() * 4.0).collect();
/// let pair = PairedSample::new(x, z).unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let result = bootstrap_correlation_interval(
///     &pair,
///     DEFAULT_RESAMPLES,
///     ProbabilityPair::NINETY_FIVE,
///     &mut rng,
/// ).unwrap();
/// assert!(result.interval.lower <= result.interval.upper);
/// ```
pub fn bootstrap_correlation_interval<R>(
    pair: &PairedSample,
    n_resamples: usize,
    probabilities: ProbabilityPair,
    rng: &mut R,
) -> Result<BootstrapResult>
where
    R: RandomSource + ?Sized,
{
    if n_resamples == 0 {
        return Err(Error::InvalidParameter(
            "number of resamples must be positive".to_string(),
        ));
    }
    Bootstrap::pearson()
        .with_resamples(n_resamples)
        .with_probabilities(probabilities)
        .confidence_interval_with_rng(pair, rng)
}

/// Seeded percentile interval of the Pearson correlation with default settings
///
/// Runs [`DEFAULT_RESAMPLES`] replicas on a ChaCha8 stream seeded with `seed`
/// and reads the bounds at [`DEFAULT_PROBABILITIES`].
pub fn correlation_interval(pair: &PairedSample, seed: u64) -> Result<BootstrapResult> {
    Bootstrap::pearson().with_seed(seed).confidence_interval(pair)
}
