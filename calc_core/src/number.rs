//! # Number Parsing
//!
//! Shared helpers that turn raw text-field strings into validated `f64`
//! values, plus the rounding and display formatting every screen uses.
//!
//! Parsing is strict: the whole trimmed string must be a finite decimal
//! number. An empty field is *incomplete* (the screen keeps its Calculate
//! action disabled), anything else that fails to parse is *invalid*.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::number::{parse_number, parse_positive, round_to};
//!
//! assert_eq!(parse_number("amount", " 12.5 ").unwrap(), 12.5);
//! assert!(parse_number("amount", "12abc").is_err());
//! assert!(parse_positive("amount", "0").is_err());
//! assert_eq!(round_to(2.345678, 2), 2.35);
//! ```

use crate::errors::{CalcError, CalcResult};

/// Parse a text field into a finite `f64`.
pub fn parse_number(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::incomplete_input(field, "This field is required"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid_input(field, trimmed, "Not a number"))?;

    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, trimmed, "Number must be finite"));
    }

    Ok(value)
}

/// Parse a text field that must hold a strictly positive number.
pub fn parse_positive(field: &str, text: &str) -> CalcResult<f64> {
    let value = parse_number(field, text)?;
    require_positive(field, value)?;
    Ok(value)
}

/// Parse an optional text field; blank text yields `None`.
pub fn parse_optional(field: &str, text: &str) -> CalcResult<Option<f64>> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(field, text).map(Some)
    }
}

/// Require a finite value strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Number must be finite"));
    }
    if value <= 0.0 {
        return Err(CalcError::incomplete_input(field, "Please enter a positive number."));
    }
    Ok(())
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a value for a calculator display.
///
/// Whole numbers print without a fractional part, `-0` prints as `0`, and
/// non-finite values print as `Infinity` / `-Infinity` / `NaN`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("x", "42").unwrap(), 42.0);
        assert_eq!(parse_number("x", "  -3.5 ").unwrap(), -3.5);
        assert_eq!(parse_number("x", ".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_number("x", "12abc").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = parse_number("x", "inf").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = parse_number("x", "NaN").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_is_incomplete() {
        let err = parse_number("x", "   ").unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");
        assert_eq!(parse_optional("x", "").unwrap(), None);
        assert_eq!(parse_optional("x", "7").unwrap(), Some(7.0));
    }

    #[test]
    fn test_positive() {
        assert!(parse_positive("x", "0").is_err());
        assert!(parse_positive("x", "-1").is_err());
        assert_eq!(parse_positive("x", "0.1").unwrap(), 0.1);
        assert!(require_positive("x", f64::NAN).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8300.0, 2), 8300.0);
        assert_eq!(round_to(1.005, 0), 1.0);
        assert_eq!(round_to(22.857142, 1), 22.9);
        assert_eq!(round_to(0.1234567, 6), 0.123457);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
