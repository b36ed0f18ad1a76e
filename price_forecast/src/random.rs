//! Injectable randomness for the stochastic components
//!
//! Nothing in the pipeline touches a global generator. Every draw goes
//! through a [`RandomSource`] handed in by the caller, which makes a
//! forecast reproducible under a fixed seed.

use crate::config::SeedPolicy;
use crate::history::NormalizedHistory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws
pub trait RandomSource {
    /// Draw uniformly from the closed interval `[low, high]`.
    ///
    /// Callers guarantee `low <= high`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Draw uniformly from `[-amplitude, amplitude]`
    fn symmetric(&mut self, amplitude: f64) -> f64 {
        self.uniform(-amplitude, amplitude)
    }
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }
}

/// Generator with a fixed seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator seeded from OS entropy
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Build the generator a seed policy calls for
pub fn rng_for(policy: SeedPolicy, history: &NormalizedHistory) -> StdRng {
    match policy {
        SeedPolicy::Entropy => from_entropy(),
        SeedPolicy::Fixed { seed } => seeded(seed),
        SeedPolicy::HistoryDigest => seeded(history.digest()),
    }
}
