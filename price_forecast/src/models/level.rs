//! Recent-level estimation

use crate::error::{ForecastError, Result};
use crate::models::LevelEstimator;
use price_math::trailing_mean;

/// Arithmetic mean of the most recent `window` prices.
///
/// A short window follows recent shocks closely, which suits a one-step
/// forecast. Shorter series are averaged in full.
#[derive(Debug, Clone)]
pub struct RecentMean {
    /// Name of the estimator
    name: String,
    /// Window size
    window: usize,
}

impl RecentMean {
    /// Create a new recent-mean estimator
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Recent Mean (window={})", window),
            window,
        })
    }

    /// Window size
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for RecentMean {
    fn default() -> Self {
        Self {
            name: "Recent Mean (window=5)".to_string(),
            window: 5,
        }
    }
}

impl LevelEstimator for RecentMean {
    fn level(&self, prices: &[f64]) -> f64 {
        // Only an empty series can fail here
        trailing_mean(prices, self.window).unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
