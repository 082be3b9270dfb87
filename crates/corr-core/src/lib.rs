//! Core types for bootstrap correlation analysis
//!
//! This crate holds the pieces every other crate in the workspace builds on:
//!
//! - [`Error`] / [`Result`]: the shared error type
//! - [`pearson`] and the [`CorrelationEstimator`] trait
//! - [`PairedSample`] and [`EmpiricalDistribution`]
//! - [`RandomSource`]: the injected random-number capability
//!
//! # Example
//!
//! ```rust
//! use corr_core::{pearson, PairedSample};
//!
//! let pair = PairedSample::new(
//!     vec![1.0, 2.0, 3.0, 4.0],
//!     vec![1.5, 1.9, 3.2, 3.9],
//! ).unwrap();
//!
//! let r = pair.correlation().unwrap();
//! assert!(r > 0.9);
//! assert_eq!(r, pearson(pair.x(), pair.y()).unwrap());
//! ```

pub mod correlation;
pub mod error;
pub mod moments;
pub mod random;
pub mod sample;

pub use correlation::{pearson, CorrelationEstimator, Pearson};
pub use error::{Error, Result};
pub use moments::Moments;
pub use random::RandomSource;
pub use sample::{EmpiricalDistribution, PairedSample};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        pearson, CorrelationEstimator, EmpiricalDistribution, Error, PairedSample, Pearson,
        RandomSource, Result,
    };
}
