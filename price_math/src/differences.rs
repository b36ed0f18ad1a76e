//! First differences of price series

use crate::{MathError, Result};

/// Consecutive differences `values[i + 1] - values[i]`
pub fn first_differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Average per-step change across the whole slice.
///
/// Needs at least two values so there is one difference to average.
pub fn mean_first_difference(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Need at least 2 values for a first difference, have {}.",
            values.len()
        )));
    }

    let diffs = first_differences(values);
    Ok(diffs.iter().sum::<f64>() / diffs.len() as f64)
}
