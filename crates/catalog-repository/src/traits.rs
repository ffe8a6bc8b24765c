//! Repository trait definitions.
//!
//! Every operation takes the caller's transaction. Repositories never begin,
//! commit, or roll back.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Category, CategoryId, NewProduct, Product, ProductChanges, ProductId, ProductSummary};

/// Product repository: persistence plus coherence of the cached listing.
#[async_trait]
pub trait ProductRepository<Tx>: Send + Sync {
    /// Inserts a product, then rebuilds the cached listing.
    async fn save(&self, tx: &mut Tx, product: NewProduct) -> CatalogResult<Product>;

    /// Applies a partial update and returns the re-read joined row.
    ///
    /// Returns `Ok(None)` when `changes` carries nothing to write; in that
    /// case neither the store nor the cache is touched. A write that matches
    /// no row is `NotFound`.
    async fn update(&self, tx: &mut Tx, changes: ProductChanges) -> CatalogResult<Option<Product>>;

    /// Deletes a product without checking that it exists, then rebuilds the
    /// cached listing.
    async fn delete(&self, tx: &mut Tx, id: ProductId) -> CatalogResult<()>;

    /// Lists all products, serving the cached listing when it is readable.
    async fn find_all(&self, tx: &mut Tx) -> CatalogResult<Vec<ProductSummary>>;

    /// Reads a product from the store, never from the cache.
    async fn find_by_id(&self, tx: &mut Tx, id: ProductId) -> CatalogResult<Product>;

    /// Re-queries the full listing and overwrites the cache entry.
    ///
    /// Store errors propagate; cache errors are logged and swallowed.
    async fn refresh_cache(&self, tx: &mut Tx) -> CatalogResult<Vec<ProductSummary>>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository<Tx>: Send + Sync {
    /// Inserts a category.
    async fn save(&self, tx: &mut Tx, name: &str) -> CatalogResult<Category>;

    /// Renames a category. `NotFound` when the id does not exist.
    async fn update(&self, tx: &mut Tx, id: CategoryId, name: &str) -> CatalogResult<Category>;

    /// Deletes a category. `NotFound` when the id does not exist.
    async fn delete(&self, tx: &mut Tx, id: CategoryId) -> CatalogResult<()>;

    /// Lists all categories ordered by id.
    async fn find_all(&self, tx: &mut Tx) -> CatalogResult<Vec<Category>>;

    /// Finds a category. `NotFound` when the id does not exist.
    async fn find_by_id(&self, tx: &mut Tx, id: CategoryId) -> CatalogResult<Category>;
}
