//! Semantic parameter validation shared by the domain tools
//!
//! The transport layer coerces parameters against the declared schema, but
//! schema validators vary in strictness, so range and presence constraints
//! are re-checked here before any network call.

use cmc_foundation::{Error, Result};
use serde_json::Value;

/// Optional integer constrained to `[min, max]`.
///
/// Absent (or null) is fine; present-but-invalid fails with `message`.
/// A fractional number like `1.5` is not an integer and fails.
pub(crate) fn optional_int_in_range(
    params: &Value,
    field: &str,
    min: i64,
    max: i64,
    message: &str,
) -> Result<Option<i64>> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_i64() {
            Some(n) if (min..=max).contains(&n) => Ok(Some(n)),
            _ => Err(Error::validation(message)),
        },
    }
}

/// Optional integer that must be >= 1 when present
pub(crate) fn optional_positive_int(
    params: &Value,
    field: &str,
    message: &str,
) -> Result<Option<i64>> {
    optional_int_in_range(params, field, 1, i64::MAX, message)
}

/// Required string parameter
pub(crate) fn required_str(params: &Value, field: &str) -> Result<String> {
    match params.get(field) {
        None | Some(Value::Null) => Err(Error::validation(format!(
            "Missing required parameter: {}",
            field
        ))),
        Some(v) => v
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::validation(format!("Parameter '{}' must be a string", field))),
    }
}

/// Optional string parameter
pub(crate) fn optional_str(params: &Value, field: &str) -> Option<String> {
    params
        .get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Required strictly-positive number
pub(crate) fn required_positive_number(
    params: &Value,
    field: &str,
    message: &str,
) -> Result<f64> {
    match params.get(field).and_then(|v| v.as_f64()) {
        Some(n) if n > 0.0 => Ok(n),
        _ => Err(Error::validation(message)),
    }
}
