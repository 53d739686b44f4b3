//! Parameter handling for [`super::SeededSource`].

use crate::error::SamplerError;

/// Distribution parameters and seed for a [`super::SeededSource`].
///
/// # Examples
/// ```
/// use netsim_core::SamplerConfig;
///
/// let config = SamplerConfig::default()
///     .with_normal(10.0, 2.0)
///     .with_seed(42);
/// assert_eq!(config.normal_mean(), 10.0);
/// assert_eq!(config.seed(), Some(42));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    normal_mean: f64,
    normal_std_dev: f64,
    uniform_low: f64,
    uniform_high: f64,
    seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            normal_mean: Self::DEFAULT_NORMAL_MEAN,
            normal_std_dev: Self::DEFAULT_NORMAL_STD_DEV,
            uniform_low: Self::DEFAULT_UNIFORM_LOW,
            uniform_high: Self::DEFAULT_UNIFORM_HIGH,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Default mean of the normal distribution.
    pub const DEFAULT_NORMAL_MEAN: f64 = 0.0;
    /// Default standard deviation of the normal distribution.
    pub const DEFAULT_NORMAL_STD_DEV: f64 = 1.0;
    /// Default inclusive lower bound of the uniform interval.
    pub const DEFAULT_UNIFORM_LOW: f64 = 0.0;
    /// Default exclusive upper bound of the uniform interval.
    pub const DEFAULT_UNIFORM_HIGH: f64 = 1.0;

    /// Creates a configuration with a standard normal and a unit uniform
    /// interval, seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the normal distribution used to populate an empty network.
    #[must_use]
    pub fn with_normal(mut self, mean: f64, std_dev: f64) -> Self {
        self.normal_mean = mean;
        self.normal_std_dev = std_dev;
        self
    }

    /// Overrides the half-open interval `[low, high)` used for values of nodes
    /// appended to a non-empty network.
    #[must_use]
    pub fn with_uniform_range(mut self, low: f64, high: f64) -> Self {
        self.uniform_low = low;
        self.uniform_high = high;
        self
    }

    /// Seeds the generator so every draw sequence is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the normal distribution mean.
    #[must_use]
    pub fn normal_mean(&self) -> f64 {
        self.normal_mean
    }

    /// Returns the normal distribution standard deviation.
    #[must_use]
    pub fn normal_std_dev(&self) -> f64 {
        self.normal_std_dev
    }

    /// Returns the uniform interval as `(low, high)`.
    #[must_use]
    pub fn uniform_range(&self) -> (f64, f64) {
        (self.uniform_low, self.uniform_high)
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks that both distributions can be constructed.
    ///
    /// # Errors
    /// Returns [`SamplerError::InvalidNormal`] when the mean is not finite or
    /// the standard deviation is negative or not finite, and
    /// [`SamplerError::InvalidUniformRange`] when the uniform bounds or their
    /// width are not finite, or `low >= high`.
    pub fn validate(&self) -> Result<(), SamplerError> {
        let normal_ok = self.normal_mean.is_finite()
            && self.normal_std_dev.is_finite()
            && self.normal_std_dev >= 0.0;
        if !normal_ok {
            return Err(SamplerError::InvalidNormal {
                mean: self.normal_mean,
                std_dev: self.normal_std_dev,
            });
        }
        let uniform_ok = self.uniform_low.is_finite()
            && self.uniform_high.is_finite()
            && self.uniform_low < self.uniform_high
            && (self.uniform_high - self.uniform_low).is_finite();
        if !uniform_ok {
            return Err(SamplerError::InvalidUniformRange {
                low: self.uniform_low,
                high: self.uniform_high,
            });
        }
        Ok(())
    }
}
