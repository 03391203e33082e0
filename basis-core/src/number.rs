//! Decimal literals and float formatting
//!
//! Coefficients and exponents are plain `f64`. Anything that would leave the
//! finite range is reported instead of silently becoming `inf` or `NaN`.

use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("invalid number format: {0}")]
    ParseError(String),

    #[error("overflow: {0} does not fit in a 64-bit float")]
    Overflow(String),

    #[error("{0} has no finite value")]
    NonFinite(String),
}

/// Parse a decimal literal such as `42`, `-3.5`, `.5` or `6.022e23`.
pub fn parse_decimal(text: &str) -> Result<f64, NumberError> {
    let text = text.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| NumberError::ParseError(text.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::Overflow(text.to_string()))
    }
}

/// Pass `value` through if it is finite, otherwise fail naming `what` produced it.
pub fn checked(value: f64, what: impl FnOnce() -> String) -> Result<f64, NumberError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::NonFinite(what()))
    }
}

/// Coefficient form: shortest round-trip digits, integral values keep `.0`.
pub fn format_coefficient(value: f64) -> String {
    // -0.0 prints as "-0.0", which reads like a sign bug
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:?}", value)
}

/// Exponent form: integral values print without a fractional part.
pub fn format_exponent(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}
