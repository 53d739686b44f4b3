//! `rand`-backed implementation of [`RandomSource`].

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Normal, Poisson, Uniform};
use tracing::{debug, warn};

use super::{RandomSource, SamplerConfig};
use crate::error::SamplerError;

/// Seedable [`RandomSource`] backed by [`SmallRng`].
///
/// Two sources built from the same seeded [`SamplerConfig`] produce identical
/// draw sequences.
///
/// # Examples
/// ```
/// use netsim_core::{RandomSource, SamplerConfig, SeededSource};
///
/// let config = SamplerConfig::default().with_seed(11);
/// let mut first = SeededSource::new(&config).expect("config is valid");
/// let mut second = SeededSource::new(&config).expect("config is valid");
/// assert_eq!(first.uniform_double(), second.uniform_double());
/// ```
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: SmallRng,
    normal: Normal<f64>,
    uniform: Uniform<f64>,
}

impl SeededSource {
    /// Builds a source from a validated configuration.
    ///
    /// Without a seed the generator is initialised from OS entropy.
    ///
    /// # Errors
    /// Returns [`SamplerError`] when [`SamplerConfig::validate`] fails.
    pub fn new(config: &SamplerConfig) -> Result<Self, SamplerError> {
        config.validate()?;
        let normal = Normal::new(config.normal_mean(), config.normal_std_dev()).map_err(|_| {
            SamplerError::InvalidNormal {
                mean: config.normal_mean(),
                std_dev: config.normal_std_dev(),
            }
        })?;
        let (low, high) = config.uniform_range();
        let rng = match config.seed() {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            rng,
            normal,
            uniform: Uniform::new(low, high),
        })
    }
}

impl RandomSource for SeededSource {
    fn normal(&mut self, buffer: &mut [f64]) {
        for slot in buffer.iter_mut() {
            *slot = self.normal.sample(&mut self.rng);
        }
    }

    fn uniform_double(&mut self) -> f64 {
        self.uniform.sample(&mut self.rng)
    }

    fn uniform_int(&mut self, buffer: &mut [usize], low: usize, high: usize) {
        if low >= high {
            buffer.fill(low);
            return;
        }
        for slot in buffer.iter_mut() {
            *slot = self.rng.gen_range(low..high);
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        reason = "Poisson samples are non-negative integral floats; the cast saturates"
    )]
    fn poisson(&mut self, buffer: &mut [usize], mean: f64) {
        // rand_distr's rejection sampler does not return for means near f64::MAX.
        const SATURATING_MEAN: f64 = usize::MAX as f64;

        if mean.is_finite() && mean >= SATURATING_MEAN {
            debug!(mean, "poisson mean exceeds usize range, saturating counts");
            buffer.fill(usize::MAX);
            return;
        }
        let distribution = if mean.is_finite() && mean > 0.0 {
            Poisson::new(mean).ok()
        } else {
            None
        };
        let Some(distribution) = distribution else {
            if mean != 0.0 && !buffer.is_empty() {
                warn!(mean, "unusable poisson mean, drawing zero counts");
            }
            buffer.fill(0);
            return;
        };
        for slot in buffer.iter_mut() {
            let draw: f64 = distribution.sample(&mut self.rng);
            *slot = draw as usize;
        }
    }
}
