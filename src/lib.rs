//! Nonparametric bootstrap confidence intervals for the Pearson correlation
//!
//! This crate re-exports the member crates of the workspace and adds
//! [`CorrelationStudy`], which runs the whole pipeline:
//!
//! 1. synthesize a partner `z` for a base sequence `x` with a prescribed
//!    correlation ([`corr_synth`])
//! 2. draw case-resampling replicas of `(x, z)` and recompute the correlation
//!    on each ([`corr_confidence`])
//! 3. read the interval bounds off the replica distribution
//!    ([`corr_quantile`]) and bin it for display ([`corr_histogram`])
//!
//! # Example
//!
//! ```rust
//! use corr_bootstrap::{CorrelationStudy, StudyConfig};
//!
//! let config = StudyConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let report = CorrelationStudy::new(config).unwrap().run().unwrap();
//!
//! assert!((report.synthesized.achieved - 0.7).abs() < 1e-9);
//! assert_eq!(report.bootstrap.distribution.len(), 1000);
//! ```

pub mod study;

pub use study::{
    CorrelationStudy, StudyConfig, StudyReport, DEFAULT_HISTOGRAM_BINS, DEFAULT_POINTS,
    DEFAULT_TARGET,
};

pub use corr_confidence as confidence;
pub use corr_core as core;
pub use corr_histogram as histogram;
pub use corr_quantile as quantile;
pub use corr_synth as synth;

pub use corr_confidence::{
    Bootstrap, BootstrapConfig, BootstrapResult, BootstrapSampler, ConfidenceInterval,
    DegenerateReplicaPolicy,
};
pub use corr_core::{pearson, EmpiricalDistribution, Error, PairedSample, Result};
pub use corr_quantile::{ProbabilityPair, QuantileMethod};
pub use corr_synth::{DataSynthesizer, RescaleMode};
