//! HTTP handlers

pub mod dishes;
pub mod health;
pub mod restaurants;

pub use health::health;

use crate::error::{ApiError, ApiResult};
use dine_types::parse_flag;

/// Parse an `:id` path segment
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::invalid_parameter(format!("Invalid id: {}", raw)))
}

/// Parse a required boolean query parameter
pub(crate) fn require_flag(name: &str, raw: Option<&str>) -> ApiResult<bool> {
    let raw = raw.ok_or_else(|| {
        ApiError::invalid_parameter(format!("Missing query parameter: {}", name))
    })?;
    parse_flag(raw).map_err(|e| {
        ApiError::invalid_parameter(format!("Invalid value for {}: {}", name, e))
    })
}

/// Reject an empty row set
pub(crate) fn non_empty<T>(rows: Vec<T>, message: impl FnOnce() -> String) -> ApiResult<Vec<T>> {
    if rows.is_empty() {
        return Err(ApiError::not_found(message()));
    }
    Ok(rows)
}

/// First row of a lookup, or not found
pub(crate) fn first<T>(rows: Vec<T>, message: impl FnOnce() -> String) -> ApiResult<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found(message()))
}
