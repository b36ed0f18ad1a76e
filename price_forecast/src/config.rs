//! Forecaster configuration
//!
//! Every field has a default, so an empty JSON object `{}` is a complete
//! configuration. Values can be overridden from the environment:
//!
//! | Env Var                    | Config Field                     |
//! |----------------------------|----------------------------------|
//! | `PRICECAST_SEED`           | `seed_policy` (forces `Fixed`)   |
//! | `PRICECAST_PRICE_DECIMALS` | `price_decimals`                 |

use crate::error::{ForecastError, Result, MIN_HISTORY};
use price_math::MAX_DECIMALS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable that pins the random seed
pub const SEED_ENV: &str = "PRICECAST_SEED";
/// Environment variable that sets the currency precision
pub const PRICE_DECIMALS_ENV: &str = "PRICECAST_PRICE_DECIMALS";

/// How a forecaster seeds its randomness when it builds its own generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Fresh OS entropy on every call; repeated requests redraw the forecast
    #[default]
    Entropy,
    /// The same seed on every call
    Fixed { seed: u64 },
    /// Seed from a digest of the normalized history, so the forecast only
    /// changes when the history does
    HistoryDigest,
}

/// Tunable parameters of the forecasting pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Fewest valid observations the gate admits
    pub min_history: usize,
    /// Number of recent prices averaged for the level
    pub level_window: usize,
    /// Number of recent prices differenced for the trend
    pub trend_window: usize,
    /// Half-width of the seasonal offset, as a fraction of the last price
    pub seasonal_amplitude: f64,
    /// Half-width of the multiplicative jitter
    pub perturbation_amplitude: f64,
    /// Decimal places of the currency's minor unit
    pub price_decimals: u32,
    /// Seeding used by `Forecaster::forecast_with_policy`
    pub seed_policy: SeedPolicy,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_history: MIN_HISTORY,
            level_window: 5,
            trend_window: 10,
            seasonal_amplitude: 0.02,
            perturbation_amplitude: 0.03,
            price_decimals: 2,
            seed_policy: SeedPolicy::Entropy,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load, apply environment overrides and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        info!(path = %path.display(), "loaded forecast configuration");
        Ok(config)
    }

    /// Apply `PRICECAST_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            let seed = raw.trim().parse::<u64>().map_err(|e| {
                ForecastError::InvalidParameter(format!("{SEED_ENV}={raw}: {e}"))
            })?;
            self.seed_policy = SeedPolicy::Fixed { seed };
        }

        if let Some(raw) = lookup(PRICE_DECIMALS_ENV) {
            self.price_decimals = raw.trim().parse::<u32>().map_err(|e| {
                ForecastError::InvalidParameter(format!("{PRICE_DECIMALS_ENV}={raw}: {e}"))
            })?;
        }

        Ok(())
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.min_history < MIN_HISTORY {
            return Err(ForecastError::InvalidParameter(format!(
                "min_history must be at least {MIN_HISTORY}, got {}",
                self.min_history
            )));
        }

        if self.level_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "level_window must be positive".to_string(),
            ));
        }

        if self.trend_window < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "trend_window must be at least 2, got {}",
                self.trend_window
            )));
        }

        for (name, value) in [
            ("seasonal_amplitude", self.seasonal_amplitude),
            ("perturbation_amplitude", self.perturbation_amplitude),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter(format!(
                    "{name} must be in [0, 1), got {value}"
                )));
            }
        }

        if self.price_decimals > MAX_DECIMALS {
            return Err(ForecastError::InvalidParameter(format!(
                "price_decimals must be at most {MAX_DECIMALS}, got {}",
                self.price_decimals
            )));
        }

        Ok(())
    }
}
