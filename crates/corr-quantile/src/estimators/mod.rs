//! Concrete quantile estimators

mod histogram;
mod linear;

pub use histogram::HistogramQuantile;
pub use linear::LinearInterpolation;
