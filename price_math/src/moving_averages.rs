//! Window means over price series
//!
//! `mean` and `trailing_mean` work on a plain slice that is already in
//! chronological order; the "most recent" values are the ones at the end of
//! the slice. `SimpleMovingAverage` is the streaming form, fed one price at a
//! time.

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Arithmetic mean of all values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the last `window` values.
///
/// When the series is shorter than the window, every available value is
/// used instead, so a 3-element series with a window of 5 averages all 3.
pub fn trailing_mean(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }

    let start = values.len().saturating_sub(window);
    mean(&values[start..])
}

/// Simple moving average over a sliding window of the last `period` prices
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new moving average over `period` values
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
        })
    }

    /// Push the next price, evicting the oldest once the window is full
    pub fn update(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Cannot average a non-finite value: {value}"
            )));
        }

        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.period {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
            }
        }

        Ok(())
    }

    /// Current average; needs a full window
    pub fn value(&self) -> Result<f64> {
        if self.values.len() < self.period {
            return Err(MathError::InsufficientData(format!(
                "Need {} values for the moving average, have {}",
                self.period,
                self.values.len()
            )));
        }

        Ok(self.sum / self.period as f64)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Number of values currently in the window
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clear the window
    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]).unwrap(), 4.0);
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_trailing_mean_uses_most_recent_window() {
        let values = [100.0, 10.0, 20.0, 30.0, 40.0, 50.0];

        // The leading 100.0 falls outside the window
        assert_eq!(trailing_mean(&values, 5).unwrap(), 30.0);
    }

    #[test]
    fn test_trailing_mean_short_series() {
        // Fewer values than the window: average what is there
        assert_eq!(trailing_mean(&[3.0, 5.0], 5).unwrap(), 4.0);
    }

    #[test]
    fn test_trailing_mean_errors() {
        assert!(matches!(
            trailing_mean(&[1.0], 0),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            trailing_mean(&[], 5),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_simple_moving_average_slides() {
        let mut sma = SimpleMovingAverage::new(3).unwrap();
        assert!(sma.is_empty());
        assert!(matches!(sma.value(), Err(MathError::InsufficientData(_))));

        sma.update(2.0).unwrap();
        sma.update(4.0).unwrap();
        assert!(sma.value().is_err());

        sma.update(6.0).unwrap();
        assert_eq!(sma.value().unwrap(), 4.0);

        // Oldest value drops out
        sma.update(8.0).unwrap();
        assert_eq!(sma.value().unwrap(), 6.0);
        assert_eq!(sma.len(), 3);
    }

    #[test]
    fn test_simple_moving_average_matches_trailing_mean() {
        let prices = [19.99, 21.5, 20.25, 22.0, 23.75, 22.5, 24.0];
        let mut sma = SimpleMovingAverage::new(5).unwrap();
        for price in prices {
            sma.update(price).unwrap();
        }

        let expected = trailing_mean(&prices, 5).unwrap();
        assert!((sma.value().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_simple_moving_average_reset_and_errors() {
        assert!(SimpleMovingAverage::new(0).is_err());

        let mut sma = SimpleMovingAverage::new(2).unwrap();
        assert!(matches!(
            sma.update(f64::INFINITY),
            Err(MathError::InvalidInput(_))
        ));

        sma.update(1.0).unwrap();
        sma.update(3.0).unwrap();
        assert_eq!(sma.period(), 2);
        sma.reset();
        assert!(sma.is_empty());
        assert!(sma.value().is_err());
    }
}
