//! Unified error types for all layers of the catalog service.

use thiserror::Error;

/// Unified error type for the catalog service.
///
/// The REST layer is the only place that turns these into HTTP responses;
/// everything below it propagates them with `?`.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Domain Errors ============
    /// Referenced product or category does not exist.
    #[error("{resource_type} with id {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Malformed input (request body, path parameter, DTO rule).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique or foreign-key constraint violation.
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Connectivity, constraint, or SQL failure in the relational store.
    #[error("Database error: {0}")]
    Database(String),

    /// Cache get/set/serialize failure.
    ///
    /// Repositories recover from these locally; they are never meant to
    /// reach a caller.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Cache(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns `true` for the not-found case.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the message may be shown to API clients.
    ///
    /// Server-side failures keep their details in the logs only.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    // unique_violation / foreign_key_violation
                    if code == "23505" || code == "23503" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::not_found("Product", 1).status_code(), 404);
        assert_eq!(CatalogError::validation("bad id").status_code(), 400);
        assert_eq!(CatalogError::Conflict("dup".to_string()).status_code(), 409);
        assert_eq!(CatalogError::Database("down".to_string()).status_code(), 500);
        assert_eq!(CatalogError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(CatalogError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::not_found("Category", 7).error_code(), "NOT_FOUND");
        assert_eq!(CatalogError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(CatalogError::Database("x".to_string()).error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("Category", 404);
        assert_eq!(err.to_string(), "Category with id 404 not found");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_server_errors_are_not_client_errors() {
        assert!(!CatalogError::Database("connection reset".to_string()).is_client_error());
        assert!(!CatalogError::internal("join").is_client_error());
        assert!(!CatalogError::Database("x".to_string()).is_not_found());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: CatalogError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_pool_errors_map_to_database() {
        let err: CatalogError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_json_error_maps_to_internal() {
        let json_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(matches!(err, CatalogError::Internal(_)));
    }
}
