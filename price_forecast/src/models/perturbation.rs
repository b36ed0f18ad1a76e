//! Stochastic perturbation of the base forecast

use crate::error::{ForecastError, Result};
use crate::models::PriceBand;
use crate::random::RandomSource;
use price_math::{round_to_decimals, MAX_DECIMALS};

/// Applies a bounded multiplicative jitter and rounds to currency precision.
///
/// The result is `base * (1 + u)` with `u` drawn from
/// `[-amplitude, amplitude]`, rounded to `decimals` places and clamped so it
/// is never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturber {
    amplitude: f64,
    decimals: u32,
}

impl Perturber {
    /// Create a new perturber
    pub fn new(amplitude: f64, decimals: u32) -> Result<Self> {
        if !(0.0..1.0).contains(&amplitude) {
            return Err(ForecastError::InvalidParameter(
                "Perturbation amplitude must be in [0, 1)".to_string(),
            ));
        }
        if decimals > MAX_DECIMALS {
            return Err(ForecastError::InvalidParameter(format!(
                "Price decimals must be at most {MAX_DECIMALS}, got {decimals}"
            )));
        }

        Ok(Self {
            amplitude,
            decimals,
        })
    }

    /// Half-width of the jitter
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Decimal places of the output
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Perturb a base forecast
    pub fn perturb<R: RandomSource>(&self, base: f64, rng: &mut R) -> f64 {
        let factor = 1.0 + rng.symmetric(self.amplitude);
        self.finish(base * factor)
    }

    /// Every value `perturb` could return for this base
    pub fn band(&self, base: f64) -> PriceBand {
        let a = self.finish(base * (1.0 - self.amplitude));
        let b = self.finish(base * (1.0 + self.amplitude));
        PriceBand {
            low: a.min(b),
            high: a.max(b),
        }
    }

    fn finish(&self, value: f64) -> f64 {
        let rounded = round_to_decimals(value, self.decimals);
        // Also folds -0.0 into 0.0
        if rounded > 0.0 {
            rounded
        } else {
            0.0
        }
    }
}

impl Default for Perturber {
    fn default() -> Self {
        Self {
            amplitude: 0.03,
            decimals: 2,
        }
    }
}
