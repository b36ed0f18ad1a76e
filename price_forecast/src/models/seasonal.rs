//! Seasonal adjustment

use crate::error::{ForecastError, Result};
use crate::models::SeasonalAdjuster;
use crate::random::RandomSource;

/// A small symmetric offset proportional to the last observed price.
///
/// Stands in for a real seasonal decomposition, which would need a longer
/// and regularly sampled series than a catalog item usually has. The offset
/// is bounded by `amplitude * last_price` in either direction.
#[derive(Debug, Clone)]
pub struct ProportionalJitter {
    /// Name of the adjuster
    name: String,
    /// Half-width as a fraction of the last price
    amplitude: f64,
}

impl ProportionalJitter {
    /// Create a new proportional seasonal adjuster
    pub fn new(amplitude: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&amplitude) {
            return Err(ForecastError::InvalidParameter(
                "Seasonal amplitude must be in [0, 1)".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Proportional Jitter (amplitude={})", amplitude),
            amplitude,
        })
    }

    /// Half-width as a fraction of the last price
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl Default for ProportionalJitter {
    fn default() -> Self {
        Self {
            name: "Proportional Jitter (amplitude=0.02)".to_string(),
            amplitude: 0.02,
        }
    }
}

impl SeasonalAdjuster for ProportionalJitter {
    fn offset<R: RandomSource>(&self, prices: &[f64], rng: &mut R) -> f64 {
        match prices.last() {
            Some(&last) => last * rng.symmetric(self.amplitude),
            None => 0.0,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
