//! Result formatting for the display.

/// Token shown for any failed or non-finite calculation.
pub const ERROR_DISPLAY: &str = "Error";

/// Scale for rounding to 10 decimal places.
const DECIMAL_SCALE: f64 = 1e10;

/// Scaled values at or above this magnitude have no fractional part left to
/// round, and dividing them back would only add representation noise.
const EXACT_SCALED_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Format a calculation result for the display.
///
/// Non-finite values become [`ERROR_DISPLAY`]. Finite values are rounded to
/// 10 decimal places, with a one-epsilon nudge so that `0.1 + 0.2` shows as
/// `0.3`, then written in their shortest decimal form with no trailing zeros.
/// The output never uses exponent notation, so it is always a valid formula.
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_DISPLAY.to_string();
    }

    let scaled = (value + f64::EPSILON) * DECIMAL_SCALE;
    let mut rounded = if scaled.abs() < EXACT_SCALED_LIMIT {
        round_half_up(scaled) / DECIMAL_SCALE
    } else {
        value
    };

    // Collapse -0 so that e.g. `-1e-12` shows as `0`.
    if rounded == 0.0 {
        rounded = 0.0;
    }

    let formatted = rounded.to_string();
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Round to the nearest integer, with halves going towards positive infinity
/// (`-2.5` -> `-2`, `2.5` -> `3`).
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}
