//! Application state for Axum handlers.

use async_trait::async_trait;
use catalog_core::CatalogResult;
use catalog_service::{CategoryService, ProductService};
use std::sync::Arc;

/// Dependency probe behind `/ready`.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Returns `Ok` when the service can take traffic.
    async fn check(&self) -> CatalogResult<()>;
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub category_service: Arc<dyn CategoryService>,
    pub readiness: Arc<dyn ReadinessCheck>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        category_service: Arc<dyn CategoryService>,
        readiness: Arc<dyn ReadinessCheck>,
    ) -> Self {
        Self {
            product_service,
            category_service,
            readiness,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
