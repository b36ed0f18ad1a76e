//! Error types for the price_forecast crate

use thiserror::Error;

/// Minimum number of valid observations the forecaster will accept
pub const MIN_HISTORY: usize = 5;

/// Raised by the admission gate when too few valid observations exist.
///
/// This is the only way a forecast can fail. It is recoverable: the caller
/// should try again once more price history has accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Insufficient price history: {observed} observations, need at least {required}")]
pub struct InsufficientHistory {
    /// Number of valid observations that were supplied
    pub observed: usize,
    /// Number of observations the forecaster requires
    pub required: usize,
}

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough price history to forecast
    #[error(transparent)]
    InsufficientHistory(#[from] InsufficientHistory),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or loading
    #[error("Data error: {0}")]
    DataError(String),

    /// A catalog entry could not be found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON parsing
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

