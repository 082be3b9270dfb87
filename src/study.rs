//! End-to-end correlation study
//!
//! Synthesize a partner for a base sequence with a known correlation,
//! bootstrap the correlation of the pair, and collect everything a renderer
//! needs (pair, replica histogram, interval) into one serializable report.

use corr_confidence::{Bootstrap, BootstrapConfig, BootstrapResult};
use corr_core::{Error, Result};
use corr_histogram::{FixedRangeBuilder, Histogram, HistogramBuilder};
use corr_synth::{index_sequence, DataSynthesizer, RescaleMode, SynthesizedData};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

/// Length of the default base sequence `0, 1, …, 19`
pub const DEFAULT_POINTS: usize = 20;

/// Default target correlation
pub const DEFAULT_TARGET: f64 = 0.7;

/// Bins of the replica histogram over `[-1, 1]`
pub const DEFAULT_HISTOGRAM_BINS: usize = corr_histogram::DEFAULT_BINS;

/// Settings of a [`CorrelationStudy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Length of the index base sequence used by [`CorrelationStudy::run`]
    pub n_points: usize,
    /// Target correlation of the synthesized partner
    pub target: f64,
    /// Final rescale step of the synthesizer
    pub rescale: RescaleMode,
    /// Seed of the synthesis stream
    ///
    /// Unless `bootstrap.seed` is set, sequential replicas are drawn from the
    /// same stream after synthesis; parallel substreams use `seed + 1`.
    pub seed: Option<u64>,
    /// Bins of the replica histogram in the report
    pub histogram_bins: usize,
    pub bootstrap: BootstrapConfig,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_POINTS,
            target: DEFAULT_TARGET,
            rescale: RescaleMode::default(),
            seed: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl StudyConfig {
    /// # Errors
    /// [`Error::InvalidParameter`] for a target outside `[-1, 1]`, a base
    /// sequence shorter than two points, zero histogram bins, or anything
    /// [`BootstrapConfig::validate`] rejects.
    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.target) {
            return Err(Error::InvalidParameter(format!(
                "target correlation {} must be in [-1, 1]",
                self.target
            )));
        }
        if self.n_points < 2 {
            return Err(Error::InvalidParameter(format!(
                "base sequence needs at least 2 points, got {}",
                self.n_points
            )));
        }
        if self.histogram_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        self.bootstrap.validate()
    }
}

/// Everything one study produced
#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    /// Seed the synthesis stream was started from
    pub seed: u64,
    pub synthesized: SynthesizedData,
    pub bootstrap: BootstrapResult,
    /// Replica correlations binned over `[-1, 1]`
    pub histogram: Histogram,
}

impl StudyReport {
    /// Whether the interval covers the requested correlation
    pub fn covers_target(&self) -> bool {
        self.bootstrap.interval.contains(self.synthesized.target)
    }
}

impl fmt::Display for StudyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = &self.synthesized;
        writeln!(
            f,
            "x: mean = {:.4}, std = {:.4}",
            data.x_moments.mean, data.x_moments.std_dev
        )?;
        writeln!(
            f,
            "y: mean = {:.4}, std = {:.4}",
            data.noise_moments.mean, data.noise_moments.std_dev
        )?;
        writeln!(f, "x.y = {:.3e}", data.residual_projection)?;
        writeln!(
            f,
            "correlation: target = {:.4}, achieved = {:.4}",
            data.target, data.achieved
        )?;
        writeln!(
            f,
            "replicas: {} ({} discarded)",
            self.bootstrap.n_resamples, self.bootstrap.discarded
        )?;
        write!(f, "{}", self.bootstrap.interval)
    }
}

/// Synthesize, resample and summarize in one call
#[derive(Debug, Clone)]
pub struct CorrelationStudy {
    config: StudyConfig,
    synthesizer: DataSynthesizer,
    histogram: FixedRangeBuilder,
}

impl CorrelationStudy {
    /// Validate `config` and prepare the pipeline
    pub fn new(config: StudyConfig) -> Result<Self> {
        config.validate()?;
        let synthesizer = DataSynthesizer::new(config.target)?.with_rescale(config.rescale);
        let histogram = FixedRangeBuilder::correlation(config.histogram_bins)?;
        Ok(Self {
            config,
            synthesizer,
            histogram,
        })
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Run on the index sequence `0, 1, …, n_points - 1`
    pub fn run(&self) -> Result<StudyReport> {
        self.run_on(&index_sequence(self.config.n_points))
    }

    /// Run on a caller-supplied base sequence
    #[instrument(skip(self, x), fields(n = x.len(), target = self.config.target))]
    pub fn run_on(&self, x: &[f64]) -> Result<StudyReport> {
        let seed = self.config.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let synthesized = self.synthesizer.synthesize(x, &mut rng)?;
        info!(
            achieved = synthesized.achieved,
            residual = synthesized.residual_projection,
            "synthesized paired data"
        );

        let bootstrap_config = &self.config.bootstrap;
        let engine = Bootstrap::from_config(bootstrap_config)?;
        let bootstrap = match (bootstrap_config.seed, bootstrap_config.parallel) {
            // Sequential replicas continue the synthesis stream
            (None, false) => engine.confidence_interval_with_rng(&synthesized.pair, &mut rng)?,
            (None, true) => engine
                .with_seed(seed.wrapping_add(1))
                .confidence_interval(&synthesized.pair)?,
            (Some(_), _) => engine.confidence_interval(&synthesized.pair)?,
        };
        let histogram = self.histogram.build(bootstrap.distribution.values())?;

        info!(
            lower = bootstrap.interval.lower,
            upper = bootstrap.interval.upper,
            estimate = bootstrap.estimate,
            "bootstrap interval"
        );

        Ok(StudyReport {
            seed,
            synthesized,
            bootstrap,
            histogram,
        })
    }
}
