//! Typed id parsing for path parameters.

use crate::responses::AppError;
use catalog_core::CatalogError;
use std::str::FromStr;

/// Parses a path segment into a typed id.
///
/// Anything that is not an integer is a `Validation` error, so a malformed
/// id answers 400 instead of axum's plain-text path rejection.
pub fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError(CatalogError::validation(format!("Invalid {resource} ID: {raw}"))))
}
