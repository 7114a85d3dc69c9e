//! Boolean-like flags
//!
//! Flags reach the service as raw text (query strings, TEXT columns). They
//! are parsed into `bool` at the boundary so that filters never compare raw
//! strings against typed storage.

use thiserror::Error;

/// Text that is not a recognised boolean spelling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected one of true, false, 1, 0 but got {0:?}")]
pub struct ParseFlagError(pub String);

/// Parse `true`/`false`/`1`/`0`, ignoring ASCII case and surrounding whitespace
pub fn parse_flag(raw: &str) -> Result<bool, ParseFlagError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Ok(false)
    } else {
        Err(ParseFlagError(raw.to_string()))
    }
}
