//! The forecasting façade
//!
//! Runs the pipeline normalizer → (level, trend, seasonal) → combiner →
//! perturber. A `Forecaster` holds only its configuration, so one instance
//! can be shared across threads; each call owns its randomness source.

use crate::config::{ForecastConfig, SeedPolicy};
use crate::error::{InsufficientHistory, Result, MIN_HISTORY};
use crate::history::{normalize, NormalizedHistory, PriceHistory};
use crate::models::{
    ForecastBasis, ForecastResult, LevelEstimator, MeanFirstDifference, Perturber,
    ProportionalJitter, RecentMean, SeasonalAdjuster, TrendEstimator,
};
use crate::random::{rng_for, RandomSource};
use tracing::{debug, info};

/// Short-horizon price forecaster
#[derive(Debug, Clone)]
pub struct Forecaster<L = RecentMean, T = MeanFirstDifference, S = ProportionalJitter> {
    level: L,
    trend: T,
    seasonal: S,
    perturber: Perturber,
    min_history: usize,
    seed_policy: SeedPolicy,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            level: RecentMean::default(),
            trend: MeanFirstDifference::default(),
            seasonal: ProportionalJitter::default(),
            perturber: Perturber::default(),
            min_history: MIN_HISTORY,
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl Forecaster {
    /// Forecaster with the default heuristic components
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the heuristic forecaster from a validated configuration
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            level: RecentMean::new(config.level_window)?,
            trend: MeanFirstDifference::new(config.trend_window)?,
            seasonal: ProportionalJitter::new(config.seasonal_amplitude)?,
            perturber: Perturber::new(config.perturbation_amplitude, config.price_decimals)?,
            min_history: config.min_history,
            seed_policy: config.seed_policy,
        })
    }
}

impl<L, T, S> Forecaster<L, T, S>
where
    L: LevelEstimator,
    T: TrendEstimator,
    S: SeasonalAdjuster,
{
    /// Replace the level estimator
    pub fn with_level<L2: LevelEstimator>(self, level: L2) -> Forecaster<L2, T, S> {
        Forecaster {
            level,
            trend: self.trend,
            seasonal: self.seasonal,
            perturber: self.perturber,
            min_history: self.min_history,
            seed_policy: self.seed_policy,
        }
    }

    /// Replace the trend estimator
    pub fn with_trend<T2: TrendEstimator>(self, trend: T2) -> Forecaster<L, T2, S> {
        Forecaster {
            level: self.level,
            trend,
            seasonal: self.seasonal,
            perturber: self.perturber,
            min_history: self.min_history,
            seed_policy: self.seed_policy,
        }
    }

    /// Replace the seasonal adjuster
    pub fn with_seasonal<S2: SeasonalAdjuster>(self, seasonal: S2) -> Forecaster<L, T, S2> {
        Forecaster {
            level: self.level,
            trend: self.trend,
            seasonal,
            perturber: self.perturber,
            min_history: self.min_history,
            seed_policy: self.seed_policy,
        }
    }

    /// Replace the perturbation step
    pub fn with_perturber(mut self, perturber: Perturber) -> Self {
        self.perturber = perturber;
        self
    }

    /// Change how `forecast_with_policy` seeds its generator
    pub fn with_seed_policy(mut self, seed_policy: SeedPolicy) -> Self {
        self.seed_policy = seed_policy;
        self
    }

    /// Fewest valid observations admitted
    pub fn min_history(&self) -> usize {
        self.min_history
    }

    /// Configured seed policy
    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    /// Forecast the next price of an item.
    ///
    /// Fails only when the history holds fewer valid observations than the
    /// admission gate requires. The same history and the same generator state
    /// always yield the same result.
    pub fn forecast<R: RandomSource>(
        &self,
        history: &PriceHistory,
        rng: &mut R,
    ) -> std::result::Result<ForecastResult, InsufficientHistory> {
        let normalized = normalize(history.observations(), self.min_history)?;
        Ok(self.forecast_normalized(&normalized, rng))
    }

    /// Forecast with a generator built from the configured seed policy
    pub fn forecast_with_policy(
        &self,
        history: &PriceHistory,
    ) -> std::result::Result<ForecastResult, InsufficientHistory> {
        let normalized = normalize(history.observations(), self.min_history)?;
        let mut rng = rng_for(self.seed_policy, &normalized);
        Ok(self.forecast_normalized(&normalized, &mut rng))
    }

    /// Run the estimators on a history that already passed the gate
    pub fn forecast_normalized<R: RandomSource>(
        &self,
        history: &NormalizedHistory,
        rng: &mut R,
    ) -> ForecastResult {
        let prices = history.prices();

        let basis = ForecastBasis {
            level: self.level.level(prices),
            trend: self.trend.trend(prices),
            seasonal: self.seasonal.offset(prices, rng),
        };
        debug!(
            level = basis.level,
            trend = basis.trend,
            seasonal = basis.seasonal,
            level_estimator = self.level.name(),
            trend_estimator = self.trend.name(),
            seasonal_adjuster = self.seasonal.name(),
            "forecast components"
        );

        let base = basis.combined();
        let predicted_price = self.perturber.perturb(base, rng);
        let band = self.perturber.band(base);
        info!(
            predicted_price,
            base,
            history_length = history.len(),
            "price forecast"
        );

        ForecastResult::new(predicted_price, basis, band, history.len())
    }
}

/// Forecast with the default components and an explicit randomness source
pub fn forecast<R: RandomSource>(
    history: &PriceHistory,
    rng: &mut R,
) -> std::result::Result<ForecastResult, InsufficientHistory> {
    Forecaster::default().forecast(history, rng)
}
