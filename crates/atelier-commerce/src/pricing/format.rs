//! Number parsing and two-decimal formatting for price fields.

/// Format a value with exactly two decimals.
///
/// Ties are rounded away from zero. A negative value that rounds to zero
/// keeps its sign (`-0.00`) while negative zero itself prints as `0.00`.
/// Non-finite values print as `NaN` / `Infinity` / `-Infinity`.
pub fn fixed2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let scaled = value * 100.0;
    // Only multiples of 1/8 can sit exactly on a half cent.
    let rounded = if (value * 8.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        (scaled.trunc() + scaled.signum()) / 100.0
    } else {
        value
    };

    if value == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Parse a typed field, `None` when empty or not a finite number.
pub(crate) fn parse_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric coercion used for the submitted offer price: empty text is zero,
/// anything unparseable is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
