//! Numeric display formatting

/// Format `value` with exactly `decimals` fractional digits.
///
/// Ties round half away from zero (`f64::round` on the scaled value), so
/// `2500.5` shows as `2501` and `72.25` as `72.3`. A result that rounds to
/// zero never carries a minus sign.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        // Too large to scale; already integral at this magnitude
        return format!("{:.*}", decimals, value);
    }
    let mut rounded = scaled.round() / scale;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{:.*}", decimals, rounded)
}
