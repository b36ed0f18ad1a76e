//! # Pricecast
//!
//! Workspace facade for the storefront price forecaster.
//!
//! - [`math`]: numeric helpers (window means, first differences, rounding)
//! - [`forecast`]: the forecasting pipeline, configuration, loaders and
//!   catalog integration
//!
//! ## Example
//!
//! ```
//! use pricecast_workspace::forecast::random::seeded;
//! use pricecast_workspace::forecast::{forecast, PriceHistory, PriceObservation};
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let history: PriceHistory = (1..=10)
//!     .map(|i| PriceObservation::new(i as f64, now + Duration::days(i)))
//!     .collect();
//!
//! let result = forecast(&history, &mut seeded(1)).unwrap();
//! assert_eq!(result.basis().trend, 1.0);
//! ```

pub use price_forecast as forecast;
pub use price_math as math;
