//! # Price Forecast
//!
//! A short-horizon price forecaster for catalog items.
//!
//! ## Features
//!
//! - Validation and chronological ordering of raw price observations
//! - Inspectable components: recent level, first-difference trend and a
//!   small seasonal offset
//! - Bounded multiplicative jitter drawn from an injectable, seedable
//!   randomness source
//! - Seed policies for redrawing or stabilizing repeated forecasts
//! - CSV/JSON history loading and catalog integration
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use price_forecast::history::{PriceHistory, PriceObservation};
//! use price_forecast::random::seeded;
//! use price_forecast::Forecaster;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let history: PriceHistory = [10.0, 20.0, 30.0, 40.0, 50.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(day, &price)| PriceObservation::new(price, start + Duration::days(day as i64)))
//!     .collect();
//!
//! let forecaster = Forecaster::new();
//! let result = forecaster.forecast(&history, &mut seeded(7)).unwrap();
//!
//! assert_eq!(result.basis().level, 30.0);
//! assert!(result.predicted_price() >= 0.0);
//! ```

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod history;
pub mod logging;
pub mod models;
pub mod random;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, SeedPolicy};
pub use crate::error::{ForecastError, InsufficientHistory};
pub use crate::forecaster::{forecast, Forecaster};
pub use crate::history::{PriceHistory, PriceObservation};
pub use crate::models::{ForecastBasis, ForecastResult, PriceDirection};
pub use crate::random::RandomSource;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
