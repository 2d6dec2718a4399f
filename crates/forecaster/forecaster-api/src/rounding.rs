//! Output rounding

/// Rounds to `places` decimals through fixed-precision decimal text
///
/// The exact binary value decides, so `2.675` (stored just below the tie)
/// becomes `2.67`. Scaling by `10^places` first would round it up.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Rounds to the two decimals forecasts are reported with
pub fn round2(value: f64) -> f64 {
    round_to(value, crate::config::DECIMAL_PLACES)
}
