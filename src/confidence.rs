//! Parsing of loosely-typed confidence and score values.
//!
//! Predictors and transformers report confidences as free text. The accepted
//! grammar, after trimming and lower-casing, is
//!
//! ```text
//! confidence := number [ "%" | "percent" | "pct" ]
//! ```
//!
//! A suffixed number is a percentage and is divided by 100; a bare number is
//! already a fraction. Results are clamped to [0, 1].

use crate::objective::clamp_unit;

/// Value used when a confidence cannot be parsed.
pub const DEFAULT_CONFIDENCE: f64 = 0.0;

const PERCENT_SUFFIXES: [&str; 3] = ["%", "percent", "pct"];

/// Parses `"0.85"`, `"85%"` or `"85 percent"` into `0.85`.
///
/// Returns `None` for empty, non-numeric or non-finite input.
pub fn parse_confidence(raw: &str) -> Option<f64> {
    let text = raw.trim().to_ascii_lowercase();

    let (number, is_percentage) = PERCENT_SUFFIXES
        .iter()
        .find_map(|suffix| text.strip_suffix(*suffix).map(|rest| (rest, true)))
        .unwrap_or((text.as_str(), false));

    let value: f64 = number.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let fraction = if is_percentage { value / 100.0 } else { value };
    Some(clamp_unit(fraction))
}

/// [`parse_confidence`] with [`DEFAULT_CONFIDENCE`] on failure.
pub fn confidence_or_default(raw: &str) -> f64 {
    parse_confidence(raw).unwrap_or(DEFAULT_CONFIDENCE)
}

/// Reads a confidence from a JSON number or string.
pub fn confidence_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map(clamp_unit),
        serde_json::Value::String(s) => parse_confidence(s),
        _ => None,
    }
}
