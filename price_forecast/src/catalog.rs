//! Catalog integration
//!
//! The storefront keeps each item's price history on its catalog entry and
//! writes the latest forecast back onto it. The store itself is an external
//! collaborator reached through [`CatalogStore`]; [`InMemoryCatalog`] is
//! enough for tests and the command line.

use crate::error::{ForecastError, Result};
use crate::forecaster::Forecaster;
use crate::history::{PriceHistory, PriceObservation, MAX_PRICE};
use crate::models::{ForecastBasis, PriceBand, PriceDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// A catalog item together with its price history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    id: String,
    name: String,
    category: String,
    price: f64,
    predicted_price: Option<f64>,
    price_history: PriceHistory,
}

impl CatalogEntry {
    /// Create an entry whose history starts with its initial price
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        listed_at: DateTime<Utc>,
    ) -> Self {
        let mut price_history = PriceHistory::new();
        price_history.record(price, listed_at);

        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            predicted_price: None,
            price_history,
        }
    }

    /// Catalog identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Current price
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Last stored forecast, if any
    pub fn predicted_price(&self) -> Option<f64> {
        self.predicted_price
    }

    /// Every recorded price
    pub fn price_history(&self) -> &PriceHistory {
        &self.price_history
    }

    /// Set a new price, recording it in the history only if it changed.
    ///
    /// Returns whether the price changed.
    pub fn update_price(&mut self, price: f64, at: DateTime<Utc>) -> bool {
        if price == self.price {
            return false;
        }

        self.price = price;
        self.price_history.record(price, at);
        true
    }

    /// Store a forecast on the entry
    pub fn set_predicted_price(&mut self, predicted_price: f64) {
        self.predicted_price = Some(predicted_price);
    }
}

/// Criteria for listing catalog entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the name
    pub keyword: Option<String>,
    /// Exact category
    pub category: Option<String>,
}

impl CatalogFilter {
    /// Check whether an entry satisfies every criterion
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let keyword_ok = self.keyword.as_ref().map_or(true, |k| {
            entry.name.to_lowercase().contains(&k.to_lowercase())
        });
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |c| entry.category == *c);

        keyword_ok && category_ok
    }
}

/// Document store holding catalog entries
pub trait CatalogStore {
    /// Fetch an entry by identifier
    fn fetch(&self, id: &str) -> Result<Option<CatalogEntry>>;

    /// Insert or replace an entry
    fn save(&mut self, entry: CatalogEntry) -> Result<()>;

    /// Entries matching a filter, ordered by identifier
    fn list(&self, filter: &CatalogFilter) -> Result<Vec<CatalogEntry>>;
}

/// Catalog store backed by an in-process map
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn fetch(&self, id: &str) -> Result<Option<CatalogEntry>> {
        Ok(self.entries.get(id).cloned())
    }

    fn save(&mut self, entry: CatalogEntry) -> Result<()> {
        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    fn list(&self, filter: &CatalogFilter) -> Result<Vec<CatalogEntry>> {
        Ok(self
            .entries
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

/// What the prediction endpoint returns for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub id: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub direction: PriceDirection,
    pub percent_change: Option<f64>,
    pub basis: ForecastBasis,
    pub band: PriceBand,
    pub price_history: PriceHistory,
}

/// Forecasts catalog items and stores the result on the entry
#[derive(Debug)]
pub struct PricePredictionService<S> {
    store: S,
    forecaster: Forecaster,
}

impl<S: CatalogStore> PricePredictionService<S> {
    /// Create a new service
    pub fn new(store: S, forecaster: Forecaster) -> Self {
        Self { store, forecaster }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Forecast an item's next price and persist it on the entry.
    ///
    /// Each call runs the forecaster under its seed policy; with the default
    /// entropy policy a repeated call redraws and overwrites the stored value.
    pub fn predict(&mut self, id: &str) -> Result<PredictionReport> {
        let mut entry = self.fetch_existing(id)?;

        let result = match self.forecaster.forecast_with_policy(entry.price_history()) {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    id,
                    observed = err.observed,
                    required = err.required,
                    "not enough price history for prediction"
                );
                return Err(ForecastError::InsufficientHistory(err));
            }
        };

        entry.set_predicted_price(result.predicted_price());
        let report = PredictionReport {
            id: entry.id.clone(),
            current_price: entry.price,
            predicted_price: result.predicted_price(),
            direction: result.direction(entry.price),
            percent_change: result.percent_change_from(entry.price),
            basis: *result.basis(),
            band: *result.band(),
            price_history: entry.price_history.clone(),
        };
        self.store.save(entry)?;

        info!(
            id,
            predicted_price = report.predicted_price,
            current_price = report.current_price,
            "stored price prediction"
        );
        Ok(report)
    }

    /// Change an item's price, appending to its history when it differs
    pub fn update_price(&mut self, id: &str, price: f64, at: DateTime<Utc>) -> Result<bool> {
        if !PriceObservation::new(price, at).is_valid() {
            return Err(ForecastError::InvalidParameter(format!(
                "Price must be finite and between 0 and {MAX_PRICE}, got {price}"
            )));
        }

        let mut entry = self.fetch_existing(id)?;
        let changed = entry.update_price(price, at);
        if changed {
            self.store.save(entry)?;
            info!(id, price, "recorded price change");
        }
        Ok(changed)
    }

    fn fetch_existing(&self, id: &str) -> Result<CatalogEntry> {
        self.store
            .fetch(id)?
            .ok_or_else(|| ForecastError::NotFound(format!("Catalog entry '{id}'")))
    }
}
