//! Random-number capability consumed by the synthesizer and the sampler
//!
//! Generators are always passed in explicitly; nothing in the workspace
//! holds a global or thread-local generator. Every `rand::Rng` is a
//! [`RandomSource`] through the blanket impl, so callers pick the generator
//! (and seed) that suits them.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;

/// The two draws the core needs from a random stream
pub trait RandomSource {
    /// Uniform integer in `[0, n)`
    ///
    /// # Panics
    /// Panics if `n == 0`.
    fn uniform_index(&mut self, n: usize) -> usize;

    /// Zero-mean Gaussian draw with the given standard deviation
    fn gaussian(&mut self, std_dev: f64) -> f64;

    /// Fill `indices` with independent uniform draws in `[0, n)`
    fn fill_indices(&mut self, n: usize, indices: &mut [usize]) {
        for idx in indices.iter_mut() {
            *idx = self.uniform_index(n);
        }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn gaussian(&mut self, std_dev: f64) -> f64 {
        let z: f64 = self.sample(StandardNormal);
        z * std_dev
    }

    fn fill_indices(&mut self, n: usize, indices: &mut [usize]) {
        let dist = Uniform::new(0, n);
        for idx in indices.iter_mut() {
            *idx = dist.sample(self);
        }
    }
}
