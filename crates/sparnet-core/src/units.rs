//! Engineering units and SI prefix handling.

use crate::error::{Error, Result};

/// Convert a netlist length or width value with an abbreviated prefix into a float.
///
/// Supported suffixes:
/// - m (milli, 1e-3)
/// - u (micro, 1e-6)
/// - n (nano, 1e-9)
///
/// A bare number is returned unscaled. Any other trailing letter is rejected
/// with [`Error::UnsupportedUnitSuffix`].
pub fn str_to_sci(s: &str) -> Result<f64> {
    let s = s.trim();
    let last = s
        .chars()
        .last()
        .ok_or_else(|| Error::InvalidValue("empty numeric value".to_string()))?;

    if !last.is_ascii_alphabetic() {
        return s
            .parse::<f64>()
            .map_err(|_| Error::InvalidValue(s.to_string()));
    }

    let (num_str, suffix) = s.split_at(s.len() - last.len_utf8());
    // Dividing by an exact power of ten rounds once, so "3u" is exactly 3e-6.
    let divisor = match suffix {
        "m" => 1e3,
        "u" => 1e6,
        "n" => 1e9,
        _ => {
            return Err(Error::UnsupportedUnitSuffix {
                value: s.to_string(),
                suffix: suffix.to_string(),
            })
        }
    };

    let base: f64 = num_str
        .parse()
        .map_err(|_| Error::InvalidValue(s.to_string()))?;
    Ok(base / divisor)
}

/// Format a value using the prefixes understood by [`str_to_sci`].
///
/// Values of magnitude one or more are written without a suffix. The text
/// always converts back to exactly `value`; when the prefixed form would not,
/// the plain number is written instead.
pub fn format_sci(value: f64) -> String {
    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value == 0.0 || abs_value >= 1.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else {
        (value * 1e9, "n")
    };

    // Rescaling leaves noise in the last digits; prefer the trimmed form.
    let trimmed = (scaled * 1e9).round() / 1e9;
    [trimmed, scaled]
        .into_iter()
        .map(|v| format!("{}{}", v, suffix))
        .find(|text| str_to_sci(text).is_ok_and(|back| back == value))
        .unwrap_or_else(|| value.to_string())
}
