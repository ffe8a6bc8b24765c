//! `ProductDao` trait: statement-level access to the `product` table.
//!
//! Every read joins `category` so the returned [`Product`] carries the
//! current category name.

use async_trait::async_trait;
use catalog_core::{CatalogResult, CategoryId, Product, ProductId};

/// Low-level product data access object.
#[async_trait]
pub trait ProductDao<Tx>: Send + Sync {
    /// Inserts a product and returns the joined row.
    async fn insert(&self, tx: &mut Tx, name: &str, category_id: CategoryId) -> CatalogResult<Product>;

    /// Sets both name and category. Returns the id of the updated row, if any.
    async fn update_name_and_category(
        &self,
        tx: &mut Tx,
        id: ProductId,
        name: &str,
        category_id: CategoryId,
    ) -> CatalogResult<Option<ProductId>>;

    /// Sets the category only.
    async fn update_category(
        &self,
        tx: &mut Tx,
        id: ProductId,
        category_id: CategoryId,
    ) -> CatalogResult<Option<ProductId>>;

    /// Sets the name only.
    async fn update_name(&self, tx: &mut Tx, id: ProductId, name: &str) -> CatalogResult<Option<ProductId>>;

    /// Finds a product by ID.
    async fn fetch_by_id(&self, tx: &mut Tx, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Lists every product ordered by id.
    async fn fetch_all(&self, tx: &mut Tx) -> CatalogResult<Vec<Product>>;

    /// Deletes a product by ID. Returns the number of rows removed.
    async fn delete(&self, tx: &mut Tx, id: ProductId) -> CatalogResult<u64>;
}
