//! Category service trait definition.

use crate::dto::{CategoryRequest, CategoryResponse};
use async_trait::async_trait;
use catalog_core::{CatalogResult, CategoryId};

/// Category service trait.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Creates a category.
    async fn create(&self, request: CategoryRequest) -> CatalogResult<CategoryResponse>;

    /// Renames a category.
    async fn update(&self, id: CategoryId, request: CategoryRequest) -> CatalogResult<CategoryResponse>;

    /// Deletes a category that no product references.
    async fn delete(&self, id: CategoryId) -> CatalogResult<()>;

    /// Gets a category by ID.
    async fn find_by_id(&self, id: CategoryId) -> CatalogResult<CategoryResponse>;

    /// Lists all categories.
    async fn find_all(&self) -> CatalogResult<Vec<CategoryResponse>>;
}
