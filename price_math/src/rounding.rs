//! Currency rounding

/// Finest precision any price is rounded to
pub const MAX_DECIMALS: u32 = 8;

/// Round to a fixed number of decimal places (half away from zero).
///
/// `decimals = 2` rounds to cents, `decimals = 0` to whole units. Values too
/// large to scale are returned unrounded; at that magnitude an `f64` has no
/// fractional digits left to round anyway.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}
