//! Combination of forecast components

/// Base forecast: the sum of level, trend and seasonal offset
pub fn combine(level: f64, trend: f64, seasonal: f64) -> f64 {
    level + trend + seasonal
}
