//! # Price Math
//!
//! Small numeric building blocks for price series.
//! The forecasting crate composes these into its level, trend and
//! perturbation components; nothing here knows about timestamps or items.

use thiserror::Error;

pub mod differences;
pub mod moving_averages;
pub mod rounding;

pub use differences::{first_differences, mean_first_difference};
pub use moving_averages::{mean, trailing_mean, SimpleMovingAverage};
pub use rounding::{round_to_decimals, MAX_DECIMALS};

/// Errors that can occur in price series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for price math operations
pub type Result<T> = std::result::Result<T, MathError>;
