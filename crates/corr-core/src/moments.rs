//! Sample moments over plain slices

/// Relative tolerance below which a centered sequence of length `n` counts
/// as constant
///
/// Compared against the ratio of the centered norm to the raw norm, so the
/// check does not depend on the units of the data. Summing `n` copies of a
/// constant misses the exact mean by at most `(n - 1)·ε` relative, which
/// bounds the centered residual of a constant sequence.
pub fn degeneracy_tolerance(n: usize) -> f64 {
    n.max(1) as f64 * f64::EPSILON
}

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use corr_core::moments::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sum of squared deviations from `center`
pub fn sum_sq_dev(data: &[f64], center: f64) -> f64 {
    data.iter()
        .map(|&x| {
            let diff = x - center;
            diff * diff
        })
        .sum()
}

/// Calculate the sample standard deviation (n - 1 denominator)
///
/// Returns 0.0 for slices with less than 2 elements.
///
/// # Examples
///
/// ```rust
/// use corr_core::moments::std_dev;
///
/// let sd = std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((sd - 1.58113883).abs() < 1e-6);
/// ```
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    (sum_sq_dev(data, mean(data)) / (data.len() - 1) as f64).sqrt()
}

/// Euclidean norm of the sequence centered on its mean
pub fn centered_norm(data: &[f64]) -> f64 {
    sum_sq_dev(data, mean(data)).sqrt()
}

/// Dot product of two equally long slices
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Whether a sequence has (numerically) zero variance
///
/// A sequence is degenerate when its centered norm is zero or vanishes
/// relative to its raw norm. Sequences containing NaN are never reported as
/// degenerate here; they surface as NaN statistics instead.
pub fn is_degenerate(data: &[f64]) -> bool {
    let centered = centered_norm(data);
    if centered == 0.0 {
        return true;
    }
    let raw = dot(data, data).sqrt();
    centered <= degeneracy_tolerance(data.len()) * raw
}

/// Mean and sample standard deviation in one call
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

impl Moments {
    /// Compute the first two moments of `data`
    pub fn of(data: &[f64]) -> Self {
        Self {
            mean: mean(data),
            std_dev: std_dev(data),
        }
    }
}
