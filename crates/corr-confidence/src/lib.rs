//! Bootstrap confidence intervals for the Pearson correlation
//!
//! Case resampling: every replica draws `n` cases of the paired sample with
//! replacement and recomputes the correlation. The percentile interval is
//! read off the empirical distribution of the replica correlations.
//!
//! - [`BootstrapSampler`] draws replicas, sequentially from one injected
//!   stream or in parallel from seeded ChaCha8 substreams
//! - [`Bootstrap`] adds quantile estimation and returns a [`BootstrapResult`]
//! - [`BootstrapConfig`] is the serializable form of the engine settings
//!
//! # Example
//!
//! ```rust
//! use corr_confidence::Bootstrap;
//! use corr_core::PairedSample;
//!
//! let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
//! let z: Vec<f64> = x.iter().map(|v| 0.7 * v + (v * 1.7).sin() * 3.0).collect();
//! let pair = PairedSample::new(x, z).unwrap();
//!
//! let result = Bootstrap::pearson()
//!     .with_resamples(500)
//!     .with_seed(42)
//!     .confidence_interval(&pair)
//!     .unwrap();
//!
//! assert!(result.interval.lower <= result.interval.upper);
//! assert_eq!(result.distribution.len(), 500);
//! ```

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod sampler;
pub mod types;

pub use bootstrap::{Bootstrap, BootstrapResult};
pub use config::BootstrapConfig;
pub use sampler::{substream, BootstrapSampler, DegenerateReplicaPolicy, SamplingOutcome};
pub use types::ConfidenceInterval;

pub use corr_core::{Error, Result};
