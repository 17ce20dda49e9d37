//! Business services.
//!
//! - `auth` - OTP login
//! - `cost` - Itemised trip cost estimate (INR)
//! - `quote` - Three-option freight quote with emissions
//! - `hscode` - HS code lookup table
//! - `ports` - Port recommendations per country
//! - `schedules` - Mock sailing schedules
//! - `tracking` - Deterministic mock vessel tracking
//! - `references` - Invoice / declaration number generation

pub mod auth;
pub mod cost;
pub mod hscode;
pub mod ports;
pub mod quote;
pub mod references;
pub mod schedules;
pub mod tracking;

use serde_json::Value;

/// Read a loosely typed numeric form field.
///
/// Numbers pass through; strings are read the way a browser form value is:
/// leading whitespace is skipped and the longest numeric prefix is used
/// (`"12.5kg"` is `12.5`). Anything else, including non-finite results, is
/// `None`.
#[must_use]
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_numeric_prefix(s),
        _ => None,
    }
}

fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s.get(..end)?
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn parse(value: &Value) -> Option<f64> {
        parse_number(Some(value))
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(parse(&json!(1000)), Some(1000.0));
        assert_eq!(parse(&json!(2.5)), Some(2.5));
    }

    #[test]
    fn test_strings_use_numeric_prefix() {
        assert_eq!(parse(&json!("1500")), Some(1500.0));
        assert_eq!(parse(&json!("  12.5kg")), Some(12.5));
        assert_eq!(parse(&json!(".5")), Some(0.5));
        assert_eq!(parse(&json!("-3")), Some(-3.0));
        assert_eq!(parse(&json!("2e3 tons")), Some(2000.0));
        assert_eq!(parse(&json!("7e")), Some(7.0));
    }

    #[test]
    fn test_non_numeric_is_none() {
        assert_eq!(parse(&json!("heavy")), None);
        assert_eq!(parse(&json!("")), None);
        assert_eq!(parse(&json!(".")), None);
        assert_eq!(parse(&json!(null)), None);
        assert_eq!(parse(&json!(true)), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_round2() {
        assert!((round2(1.005_1) - 1.01).abs() < f64::EPSILON);
        assert!((round2(84.0 * 3.5) - 294.0).abs() < f64::EPSILON);
    }
}
