//! Trend estimation

use crate::error::{ForecastError, Result};
use crate::models::TrendEstimator;
use price_math::mean_first_difference;

/// Average first difference over the most recent `window` prices.
///
/// Below `window` observations there is not enough signal to tell a trend
/// from noise, and the trend is reported as zero. With the default window
/// of 10 the trend is the mean of the last 9 consecutive changes.
#[derive(Debug, Clone)]
pub struct MeanFirstDifference {
    /// Name of the estimator
    name: String,
    /// Window size
    window: usize,
}

impl MeanFirstDifference {
    /// Create a new first-difference trend estimator
    pub fn new(window: usize) -> Result<Self> {
        if window < 2 {
            return Err(ForecastError::InvalidParameter(
                "Trend window must span at least 2 observations".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Mean First Difference (window={})", window),
            window,
        })
    }

    /// Window size
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MeanFirstDifference {
    fn default() -> Self {
        Self {
            name: "Mean First Difference (window=10)".to_string(),
            window: 10,
        }
    }
}

impl TrendEstimator for MeanFirstDifference {
    fn trend(&self, prices: &[f64]) -> f64 {
        if prices.len() < self.window {
            return 0.0;
        }

        let recent = &prices[prices.len() - self.window..];
        mean_first_difference(recent).unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
