//! Forecast components and the values they produce
//!
//! Each sub-estimator sits behind its own trait so an alternative (an
//! autoregressive trend, a calendar-based seasonal term) can replace the
//! heuristic one without touching the combiner or the façade.

use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;

pub mod combiner;
pub mod level;
pub mod perturbation;
pub mod seasonal;
pub mod trend;

pub use combiner::combine;
pub use level::RecentMean;
pub use perturbation::Perturber;
pub use seasonal::ProportionalJitter;
pub use trend::MeanFirstDifference;

/// Estimates where prices are right now
pub trait LevelEstimator: Debug + Send + Sync {
    /// Level of a chronologically ordered price series
    fn level(&self, prices: &[f64]) -> f64;

    /// Name of the estimator
    fn name(&self) -> &str;
}

/// Estimates the average per-step price change
pub trait TrendEstimator: Debug + Send + Sync {
    /// Trend of a chronologically ordered price series
    fn trend(&self, prices: &[f64]) -> f64;

    /// Name of the estimator
    fn name(&self) -> &str;
}

/// Produces a small additive offset for cyclical effects
pub trait SeasonalAdjuster: Debug + Send + Sync {
    /// Offset for a chronologically ordered price series
    fn offset<R: RandomSource>(&self, prices: &[f64], rng: &mut R) -> f64;

    /// Name of the adjuster
    fn name(&self) -> &str;
}

/// The additive components behind a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastBasis {
    /// Recent-level estimate
    pub level: f64,
    /// Average per-step change
    pub trend: f64,
    /// Seasonal offset
    pub seasonal: f64,
}

impl ForecastBasis {
    /// Base forecast before perturbation
    pub fn combined(&self) -> f64 {
        combine(self.level, self.trend, self.seasonal)
    }
}

/// Range the perturbation could have produced from the same base forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl PriceBand {
    /// Check whether a price falls inside the band
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    /// Width of the band
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Expected movement relative to a current price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Rise,
    Fall,
    Flat,
}

/// Result of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    predicted_price: f64,
    basis: ForecastBasis,
    band: PriceBand,
    history_length: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(
        predicted_price: f64,
        basis: ForecastBasis,
        band: PriceBand,
        history_length: usize,
    ) -> Self {
        Self {
            predicted_price,
            basis,
            band,
            history_length,
        }
    }

    /// Forecast price, never negative
    pub fn predicted_price(&self) -> f64 {
        self.predicted_price
    }

    /// Components the forecast was built from
    pub fn basis(&self) -> &ForecastBasis {
        &self.basis
    }

    /// Confidence band around the base forecast
    pub fn band(&self) -> &PriceBand {
        &self.band
    }

    /// Number of valid observations the forecast used
    pub fn history_length(&self) -> usize {
        self.history_length
    }

    /// Predicted minus current price
    pub fn change_from(&self, current_price: f64) -> f64 {
        self.predicted_price - current_price
    }

    /// Change as a percentage of the current price
    pub fn percent_change_from(&self, current_price: f64) -> Option<f64> {
        if current_price == 0.0 {
            return None;
        }

        Some(self.change_from(current_price) / current_price * 100.0)
    }

    /// Whether the price is expected to rise, fall or hold
    pub fn direction(&self, current_price: f64) -> PriceDirection {
        match self.predicted_price.partial_cmp(&current_price) {
            Some(Ordering::Greater) => PriceDirection::Rise,
            Some(Ordering::Less) => PriceDirection::Fall,
            _ => PriceDirection::Flat,
        }
    }
}
