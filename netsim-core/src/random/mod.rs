//! Random-number capability consumed by [`crate::Network`].
//!
//! The network never owns a generator. Randomized operations receive a
//! [`RandomSource`] from the caller, which keeps draws sequential with the
//! network's own mutations and lets tests substitute a seeded or scripted
//! source.

mod config;
mod seeded;

pub use self::{config::SamplerConfig, seeded::SeededSource};

/// Narrow sampling interface used by the randomized network operations.
///
/// Implementations must be deterministic for a fixed internal state so that
/// seeded runs are reproducible.
///
/// # Examples
/// ```
/// use netsim_core::{RandomSource, SamplerConfig, SeededSource};
///
/// let mut source = SeededSource::new(&SamplerConfig::default().with_seed(7))
///     .expect("default config is valid");
/// let mut picks = [0_usize; 4];
/// source.uniform_int(&mut picks, 2, 5);
/// assert!(picks.iter().all(|&pick| (2..5).contains(&pick)));
/// ```
pub trait RandomSource {
    /// Fills `buffer` with normally distributed samples.
    fn normal(&mut self, buffer: &mut [f64]);

    /// Returns one uniformly distributed real value.
    fn uniform_double(&mut self) -> f64;

    /// Fills `buffer` with integers drawn uniformly from `[low, high)`.
    ///
    /// An empty range fills the buffer with `low`.
    fn uniform_int(&mut self, buffer: &mut [usize], low: usize, high: usize);

    /// Fills `buffer` with Poisson-distributed counts around `mean`.
    ///
    /// A mean that is not strictly positive and finite yields zeros. Counts
    /// that cannot fit in `usize` saturate at `usize::MAX`.
    fn poisson(&mut self, buffer: &mut [usize], mean: f64);
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn normal(&mut self, buffer: &mut [f64]) {
        (**self).normal(buffer);
    }

    fn uniform_double(&mut self) -> f64 {
        (**self).uniform_double()
    }

    fn uniform_int(&mut self, buffer: &mut [usize], low: usize, high: usize) {
        (**self).uniform_int(buffer, low, high);
    }

    fn poisson(&mut self, buffer: &mut [usize], mean: f64) {
        (**self).poisson(buffer, mean);
    }
}
