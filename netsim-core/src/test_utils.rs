//! Shared test utilities for `netsim-core`.

use std::collections::VecDeque;

use netsim_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::random::RandomSource;

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`RandomSource`] that replays pre-recorded draws.
///
/// Once a script runs dry the source falls back to `0.0` for real draws, `low`
/// for integer draws and `0` for Poisson counts. Integer draws are returned
/// verbatim, even when they fall outside the requested range.
///
/// # Examples
/// ```ignore
/// let mut source = ScriptedSource::default().with_ints([2, 0]);
/// let mut slot = [0_usize; 1];
/// source.uniform_int(&mut slot, 0, 3);
/// assert_eq!(slot, [2]);
/// ```
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedSource {
    normals: VecDeque<f64>,
    uniforms: VecDeque<f64>,
    ints: VecDeque<usize>,
    counts: VecDeque<usize>,
    int_draws: usize,
}

impl ScriptedSource {
    #[must_use]
    pub(crate) fn with_normals(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.normals.extend(draws);
        self
    }

    #[must_use]
    pub(crate) fn with_uniforms(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(draws);
        self
    }

    #[must_use]
    pub(crate) fn with_ints(mut self, draws: impl IntoIterator<Item = usize>) -> Self {
        self.ints.extend(draws);
        self
    }

    #[must_use]
    pub(crate) fn with_counts(mut self, draws: impl IntoIterator<Item = usize>) -> Self {
        self.counts.extend(draws);
        self
    }

    /// Number of integer values handed out so far.
    pub(crate) fn int_draws(&self) -> usize {
        self.int_draws
    }
}

impl RandomSource for ScriptedSource {
    fn normal(&mut self, buffer: &mut [f64]) {
        for slot in buffer.iter_mut() {
            *slot = self.normals.pop_front().unwrap_or(0.0);
        }
    }

    fn uniform_double(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(0.0)
    }

    fn uniform_int(&mut self, buffer: &mut [usize], low: usize, _high: usize) {
        for slot in buffer.iter_mut() {
            *slot = self.ints.pop_front().unwrap_or(low);
            self.int_draws += 1;
        }
    }

    fn poisson(&mut self, buffer: &mut [usize], _mean: f64) {
        for slot in buffer.iter_mut() {
            *slot = self.counts.pop_front().unwrap_or(0);
        }
    }
}
