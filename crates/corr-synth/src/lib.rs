//! Synthetic paired data with a prescribed correlation
//!
//! Used to validate the bootstrap end to end: synthesize `z` with a known
//! correlation to `x`, resample, and check that the interval covers the
//! target.
//!
//! # Example
//!
//! ```rust
//! use corr_synth::{index_sequence, DataSynthesizer};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let x = index_sequence(20);
//! let mut rng = StdRng::seed_from_u64(42);
//! let data = DataSynthesizer::new(0.7).unwrap().synthesize(&x, &mut rng).unwrap();
//!
//! assert!((data.achieved - 0.7).abs() < 1e-9);
//! ```

mod synthesizer;

pub use synthesizer::{index_sequence, synthesize, DataSynthesizer, RescaleMode, SynthesizedData};

pub use corr_core::{Error, Result};
