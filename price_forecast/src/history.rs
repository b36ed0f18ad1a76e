//! Price observations, item histories and the admission gate

use crate::data::parse_timestamp;
use crate::error::InsufficientHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use xxhash_rust::xxh3::Xxh3;

/// One recorded price for one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    /// Recorded price, in currency units
    pub price: f64,
    /// When the price was recorded
    #[serde(alias = "date", deserialize_with = "deserialize_timestamp")]
    pub observed_at: DateTime<Utc>,
}

/// Largest price the forecaster accepts.
///
/// Window sums, jitter and rounding of prices up to this bound all stay
/// finite.
pub const MAX_PRICE: f64 = 1e15;

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(raw.trim())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

impl PriceObservation {
    /// Create a new observation
    pub fn new(price: f64, observed_at: DateTime<Utc>) -> Self {
        Self { price, observed_at }
    }

    /// Finite, non-negative and at most [`MAX_PRICE`]
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && (0.0..=MAX_PRICE).contains(&self.price)
    }
}

/// Every recorded price of a single item, in insertion order.
///
/// Insertion order carries no meaning for forecasting except to break ties
/// between observations that share a timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceHistory {
    observations: Vec<PriceObservation>,
}

impl PriceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation
    pub fn push(&mut self, observation: PriceObservation) {
        self.observations.push(observation);
    }

    /// Append a price recorded at the given time
    pub fn record(&mut self, price: f64, observed_at: DateTime<Utc>) {
        self.push(PriceObservation::new(price, observed_at));
    }

    /// Observations in insertion order
    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// Number of observations, valid or not
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the history has no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The chronologically latest observation (last inserted wins a tie)
    pub fn latest(&self) -> Option<&PriceObservation> {
        // max_by_key returns the last of equal maxima
        self.observations.iter().max_by_key(|o| o.observed_at)
    }
}

impl From<Vec<PriceObservation>> for PriceHistory {
    fn from(observations: Vec<PriceObservation>) -> Self {
        Self { observations }
    }
}

impl FromIterator<PriceObservation> for PriceHistory {
    fn from_iter<I: IntoIterator<Item = PriceObservation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

/// A validated, chronologically ordered snapshot of a history.
///
/// Only [`normalize`] builds one, so holding a `NormalizedHistory` means the
/// admission gate has already passed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHistory {
    observations: Vec<PriceObservation>,
    prices: Vec<f64>,
}

impl NormalizedHistory {
    /// Prices, oldest first
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Observations, oldest first
    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// Number of observations that passed validation
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always false once past the gate, kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent price
    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// Stable 64-bit digest of the ordered snapshot.
    ///
    /// Two snapshots with the same prices at the same timestamps, in the same
    /// order, produce the same digest across runs and platforms.
    pub fn digest(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for observation in &self.observations {
            hasher.update(&observation.price.to_bits().to_le_bytes());
            hasher.update(&observation.observed_at.timestamp().to_le_bytes());
            hasher.update(&observation.observed_at.timestamp_subsec_nanos().to_le_bytes());
        }
        hasher.digest()
    }
}

/// Validate and chronologically order raw observations.
///
/// Observations with a negative, non-finite or above [`MAX_PRICE`] price
/// are dropped. The rest
/// are stably sorted by `observed_at`, so equal timestamps keep their input
/// order. Fails when fewer than `required` valid observations remain.
pub fn normalize(
    observations: &[PriceObservation],
    required: usize,
) -> Result<NormalizedHistory, InsufficientHistory> {
    let mut valid: Vec<PriceObservation> =
        observations.iter().filter(|o| o.is_valid()).copied().collect();

    let dropped = observations.len() - valid.len();
    if dropped > 0 {
        warn!(dropped, "discarding price observations with invalid prices");
    }

    if valid.len() < required {
        return Err(InsufficientHistory {
            observed: valid.len(),
            required,
        });
    }

    // Vec::sort_by_key is stable
    valid.sort_by_key(|o| o.observed_at);
    let prices = valid.iter().map(|o| o.price).collect();

    Ok(NormalizedHistory {
        observations: valid,
        prices,
    })
}
