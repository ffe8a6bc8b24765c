//! Product service trait definition.

use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use async_trait::async_trait;
use catalog_core::{CatalogResult, ProductId};

/// Product service trait.
///
/// Every call runs in its own transaction: committed when the call returns
/// `Ok`, rolled back on any error.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Creates a product in an existing category.
    async fn create(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse>;

    /// Applies a partial update to an existing product.
    async fn update(&self, id: ProductId, request: UpdateProductRequest) -> CatalogResult<ProductResponse>;

    /// Deletes an existing product.
    async fn delete(&self, id: ProductId) -> CatalogResult<()>;

    /// Gets a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<ProductResponse>;

    /// Lists all products.
    async fn find_all(&self) -> CatalogResult<Vec<ProductResponse>>;
}
