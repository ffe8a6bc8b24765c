//! `CategoryDao` trait: statement-level access to the `category` table.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Category, CategoryId};

/// Low-level category data access object.
#[async_trait]
pub trait CategoryDao<Tx>: Send + Sync {
    /// Inserts a category and returns it with its assigned id.
    async fn insert(&self, tx: &mut Tx, name: &str) -> CatalogResult<Category>;

    /// Renames a category. Returns `None` when no row matched.
    async fn update(&self, tx: &mut Tx, id: CategoryId, name: &str) -> CatalogResult<Option<Category>>;

    /// Deletes a category by ID. Returns the number of rows removed.
    async fn delete(&self, tx: &mut Tx, id: CategoryId) -> CatalogResult<u64>;

    /// Finds a category by ID.
    async fn fetch_by_id(&self, tx: &mut Tx, id: CategoryId) -> CatalogResult<Option<Category>>;

    /// Lists every category ordered by id.
    async fn fetch_all(&self, tx: &mut Tx) -> CatalogResult<Vec<Category>>;
}
