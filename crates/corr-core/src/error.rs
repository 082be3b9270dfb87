//! Error types for correlation bootstrap analysis
//!
//! Provides a unified error type for all corr-bootstrap crates.

use thiserror::Error;

/// Core error type for correlation and resampling operations
#[derive(Error, Debug)]
pub enum Error {
    /// A statistic is undefined for the input (zero variance or too few values)
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Malformed pair of tail probabilities
    #[error("Invalid probabilities: ({lower}, {upper}) must satisfy 0 < lower < upper < 1")]
    InvalidProbability { lower: f64, upper: f64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} values, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a sequence that is too short for a statistic
    pub fn too_short(actual: usize, context: &str) -> Self {
        Self::DegenerateInput(format!(
            "{context} needs at least 2 values, got {actual}"
        ))
    }

    /// Create an error for a zero-variance sequence
    pub fn zero_variance(context: &str) -> Self {
        Self::DegenerateInput(format!("{context} has zero variance"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Whether this error reports a degenerate input
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DegenerateInput("x has zero variance".to_string());
        assert_eq!(err.to_string(), "Degenerate input: x has zero variance");

        let err = Error::InvalidProbability { lower: 0.9, upper: 0.1 };
        assert_eq!(
            err.to_string(),
            "Invalid probabilities: (0.9, 0.1) must satisfy 0 < lower < upper < 1"
        );

        let err = Error::InsufficientData { expected: 1, actual: 0 };
        assert_eq!(err.to_string(), "Insufficient data: expected at least 1 values, got 0");
    }

    #[test]
    fn test_error_helpers() {
        let err = Error::too_short(1, "bootstrap sample");
        assert!(err.is_degenerate());
        assert_eq!(
            err.to_string(),
            "Degenerate input: bootstrap sample needs at least 2 values, got 1"
        );

        let err = Error::zero_variance("y");
        assert!(err.is_degenerate());

        let err = Error::size_mismatch(20, 19, "paired sample");
        assert!(!err.is_degenerate());
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in paired sample: expected 20, got 19"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("renderer unavailable").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("renderer unavailable")),
            _ => panic!("Wrong error type"),
        }
    }
}
