//! Pearson correlation coefficient
//!
//! The sample coefficient is
//!
//! ```text
//! r = Σ (x_i - x̄)(y_i - ȳ) / ((n - 1) · s_x · s_y)
//! ```
//!
//! where `s_x`, `s_y` are the (n - 1) sample standard deviations. The
//! `(n - 1)` factors cancel, so this is the usual cross-product over the
//! root of the product of squared deviations.

use crate::moments::{is_degenerate, mean, sum_sq_dev};
use crate::{Error, Result};

/// A statistic measuring association between two paired sequences
///
/// The bootstrap sampler is generic over this trait so that the per-replica
/// statistic can be swapped without touching the resampling loop.
pub trait CorrelationEstimator: Clone + Send + Sync {
    /// Compute the statistic for two equally long sequences
    fn correlation(&self, x: &[f64], y: &[f64]) -> Result<f64>;

    /// Name for diagnostics
    fn name(&self) -> &'static str;
}

/// Sample Pearson correlation
#[derive(Debug, Clone, Copy, Default)]
pub struct Pearson;

impl CorrelationEstimator for Pearson {
    fn correlation(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        pearson(x, y)
    }

    fn name(&self) -> &'static str {
        "Pearson"
    }
}

/// Calculate the Pearson correlation coefficient of `x` and `y`
///
/// The result is clamped to `[-1, 1]` to absorb rounding in the last ulp.
///
/// # Errors
///
/// * [`Error::InvalidInput`] if the lengths differ
/// * [`Error::DegenerateInput`] if fewer than two pairs are given or either
///   sequence has zero variance
///
/// # Examples
///
/// ```rust
/// use corr_core::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "correlation"));
    }

    let n = x.len();
    if n < 2 {
        return Err(Error::too_short(n, "correlation"));
    }
    if is_degenerate(x) {
        return Err(Error::zero_variance("first sequence"));
    }
    if is_degenerate(y) {
        return Err(Error::zero_variance("second sequence"));
    }

    let mean_x = mean(x);
    let mean_y = mean(y);
    let denom = (n - 1) as f64;
    let std_x = (sum_sq_dev(x, mean_x) / denom).sqrt();
    let std_y = (sum_sq_dev(y, mean_y) / denom).sqrt();

    let cross: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum();

    Ok((cross / std_x / std_y / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pearson_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        // cross = 8, ssx = 10, ssy = 10
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let expected = 8.0 / (10.0_f64 * 10.0).sqrt();
        assert_abs_diff_eq!(pearson(&x, &y).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![5.0, 5.0, 5.0, 5.0, 5.0];
        assert!(pearson(&x, &y).unwrap_err().is_degenerate());
        assert!(pearson(&y, &x).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_pearson_too_short() {
        assert!(pearson(&[1.0], &[2.0]).unwrap_err().is_degenerate());
        assert!(pearson(&[], &[]).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_pearson_length_mismatch() {
        match pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]) {
            Err(Error::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_trait_dispatch() {
        let estimator = Pearson;
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 2.0, 1.0];
        assert_eq!(estimator.name(), "Pearson");
        assert_abs_diff_eq!(
            estimator.correlation(&x, &y).unwrap(),
            pearson(&x, &y).unwrap()
        );
    }
}
