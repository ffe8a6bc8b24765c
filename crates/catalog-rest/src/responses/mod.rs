//! API response types.
//!
//! Every response, success or failure, uses the same envelope:
//! `{"status_code": <int>, "data": <payload | null>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::CatalogError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Standard API response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` with the given status.
    pub fn new(status: StatusCode, data: Option<T>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub CatalogError);

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side details stay in the log.
        let data = if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
            None
        } else {
            Some(self.0.to_string())
        };

        (status, Json(ApiResponse::new(status, data))).into_response()
    }
}

/// Successful handler output: status plus enveloped body.
pub type Enveloped<T> = (StatusCode, Json<ApiResponse<T>>);

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Enveloped<T>, AppError>;

/// Helper to create a success (200) response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::new(StatusCode::OK, Some(data)))))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::new(StatusCode::CREATED, Some(data)))))
}

/// Helper to create a 200 response whose `data` is `null`.
pub fn ok_empty() -> ApiResult<()> {
    Ok((StatusCode::OK, Json(ApiResponse::new(StatusCode::OK, None))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::new(StatusCode::OK, None)).unwrap();
        assert_eq!(body, serde_json::json!({"status_code": 200, "data": null}));
    }

    #[test]
    fn test_client_errors_carry_message() {
        let response = AppError(CatalogError::not_found("Product", 3)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError(CatalogError::Conflict("still referenced".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_server_errors_map_to_500() {
        for err in [
            CatalogError::Database("connection reset".into()),
            CatalogError::Internal("join failed".into()),
        ] {
            assert_eq!(AppError(err).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
