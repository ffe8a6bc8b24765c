//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and runs the `validator` rules
//! on it. Both malformed JSON and failed rules are rejected as
//! [`CatalogError::Validation`], so clients see the usual 400 envelope.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use catalog_core::{CatalogError, ValidateExt};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use catalog_rest::extractors::ValidatedJson;
///
/// async fn create_category(ValidatedJson(request): ValidatedJson<CategoryRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(CatalogError::validation(format!("Invalid JSON: {}", rejection.body_text()))))?;

        value.validate_request()?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use catalog_service::CategoryRequest;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(request) = ValidatedJson::<CategoryRequest>::from_request(json_request(r#"{"name":"Furniture"}"#), &())
            .await
            .unwrap();
        assert_eq!(request.name, "Furniture");
    }

    #[tokio::test]
    async fn test_rule_violation_is_validation_error() {
        let err = ValidatedJson::<CategoryRequest>::from_request(json_request(r#"{"name":" "}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.0.to_string(), "Validation error: name: Name is required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let err = ValidatedJson::<CategoryRequest>::from_request(json_request("{"), &())
            .await
            .unwrap_err();
        assert!(matches!(err.0, CatalogError::Validation(_)));
    }
}
