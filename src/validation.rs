//! Argument validators
//!
//! Pure checks run against the loosely typed tool arguments before any request
//! leaves the process. Every validator receives the raw value (which may be
//! absent) plus the field label used in the error message, and returns the
//! typed value on success.

use crate::error::{Result, StoreError};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

/// The two accepted sort tokens.
pub const SORT_ORDERS: [&str; 2] = ["asc", "desc"];

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn as_positive_integer(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return (n > 0).then_some(n);
    }
    // Integral floats (`3.0`) are still integers on the wire.
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f > 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

fn as_finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|f| f.is_finite())
}

// =============================================================================
// Integers
// =============================================================================

/// Required positive integer (ids, quantities).
pub fn positive_integer(value: Option<&Value>, field: &str) -> Result<u64> {
    if is_missing(value) {
        return Err(StoreError::validation(format!("{field} is required")));
    }
    optional_positive_integer(value, field)?
        .ok_or_else(|| StoreError::validation(format!("{field} must be a positive integer")))
}

pub fn optional_positive_integer(value: Option<&Value>, field: &str) -> Result<Option<u64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_positive_integer(v)
            .map(Some)
            .ok_or_else(|| StoreError::validation(format!("{field} must be a positive integer"))),
    }
}

/// Optional result-count limit.
pub fn limit(value: Option<&Value>) -> Result<Option<u64>> {
    optional_positive_integer(value, "limit")
}

/// Optional sort order; only the exact tokens in [`SORT_ORDERS`] pass.
pub fn sort_order(value: Option<&Value>) -> Result<Option<&'static str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => SORT_ORDERS
            .into_iter()
            .find(|token| *token == s.as_str())
            .map(Some)
            .ok_or_else(invalid_sort),
        Some(_) => Err(invalid_sort()),
    }
}

fn invalid_sort() -> StoreError {
    StoreError::validation(format!("sort must be one of: {}", SORT_ORDERS.join(", ")))
}

// =============================================================================
// Numbers
// =============================================================================

/// Required finite number strictly greater than zero (prices).
pub fn positive_number(value: Option<&Value>, field: &str) -> Result<f64> {
    if is_missing(value) {
        return Err(StoreError::validation(format!("{field} is required")));
    }
    optional_positive_number(value, field)?
        .ok_or_else(|| StoreError::validation(format!("{field} must be a positive number")))
}

pub fn optional_positive_number(value: Option<&Value>, field: &str) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_finite_number(v)
            .filter(|f| *f > 0.0)
            .map(Some)
            .ok_or_else(|| StoreError::validation(format!("{field} must be a positive number"))),
    }
}

/// Any finite number (coordinates).
pub fn optional_number(value: Option<&Value>, field: &str) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_finite_number(v)
            .map(Some)
            .ok_or_else(|| StoreError::validation(format!("{field} must be a number"))),
    }
}

// =============================================================================
// Strings
// =============================================================================

/// Required string with at least one non-whitespace character.
pub fn non_empty_string(value: Option<&Value>, field: &str) -> Result<String> {
    if is_missing(value) {
        return Err(StoreError::validation(format!("{field} is required")));
    }
    optional_non_empty_string(value, field)?
        .ok_or_else(|| StoreError::validation(format!("{field} must be a non-empty string")))
}

pub fn optional_non_empty_string(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(_) => Err(StoreError::validation(format!(
            "{field} must be a non-empty string"
        ))),
    }
}

pub fn email(value: Option<&Value>, field: &str) -> Result<String> {
    let address = non_empty_string(value, field)?;
    check_email(address, field)
}

pub fn optional_email(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    optional_non_empty_string(value, field)?
        .map(|address| check_email(address, field))
        .transpose()
}

fn check_email(address: String, field: &str) -> Result<String> {
    if EMAIL_PATTERN.is_match(&address) {
        Ok(address)
    } else {
        Err(StoreError::validation(format!(
            "{field} must be a valid email address"
        )))
    }
}

/// Absolute `http`/`https` URL.
pub fn http_url(value: Option<&Value>, field: &str) -> Result<String> {
    let raw = non_empty_string(value, field)?;
    check_http_url(raw, field)
}

pub fn optional_http_url(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    optional_non_empty_string(value, field)?
        .map(|raw| check_http_url(raw, field))
        .transpose()
}

fn check_http_url(raw: String, field: &str) -> Result<String> {
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(raw),
        _ => Err(StoreError::validation(format!(
            "{field} must be a valid http(s) URL"
        ))),
    }
}

/// Percent-encodes a value for use as a single request path segment.
///
/// Everything outside the RFC 3986 unreserved set is escaped, so a `/` inside
/// the value cannot introduce an extra segment. Dot-only values (`.`, `..`)
/// are rejected: they survive encoding and would be collapsed by URL
/// normalization into a different path.
pub fn sanitize_path_segment(segment: &str, field: &str) -> Result<String> {
    if segment.chars().all(|c| c == '.') {
        return Err(StoreError::validation(format!(
            "{field} must not consist only of dots"
        )));
    }
    Ok(urlencoding::encode(segment).into_owned())
}

// =============================================================================
// Structured values
// =============================================================================

/// One `{productId, quantity}` entry of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineInput {
    pub product_id: u64,
    pub quantity: u64,
}

/// Required non-empty array of cart lines.
pub fn cart_lines(value: Option<&Value>, field: &str) -> Result<Vec<CartLineInput>> {
    if is_missing(value) {
        return Err(StoreError::validation(format!("{field} is required")));
    }
    optional_cart_lines(value, field)?
        .ok_or_else(|| StoreError::validation(format!("{field} must be a non-empty array")))
}

pub fn optional_cart_lines(
    value: Option<&Value>,
    field: &str,
) -> Result<Option<Vec<CartLineInput>>> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        Some(_) => {
            return Err(StoreError::validation(format!(
                "{field} must be a non-empty array"
            )))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(StoreError::validation(format!(
                    "{field}[{index}] must be an object"
                )));
            }
            Ok(CartLineInput {
                product_id: positive_integer(
                    entry.get("productId"),
                    &format!("{field}[{index}].productId"),
                )?,
                quantity: positive_integer(
                    entry.get("quantity"),
                    &format!("{field}[{index}].quantity"),
                )?,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
