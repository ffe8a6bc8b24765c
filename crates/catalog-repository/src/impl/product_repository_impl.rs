//! `ProductRepositoryImpl`: product persistence plus listing-cache coherence.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn ProductRepository<Tx>>
//! ProductRepositoryImpl        ← owns the cached listing
//!   ↓ Arc<dyn ProductDao<Tx>>     ↓ Arc<dyn CacheInterface>
//! PgProductDao                  RedisCacheService
//! ```
//!
//! Point reads and writes always hit the store. Only `find_all` is served
//! from the cache, and every write rebuilds the cached listing from the
//! store inside the caller's transaction. Each cache call runs under a short
//! deadline; a call that overruns it is treated like any other cache failure.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dao::ProductDao;
use crate::traits::ProductRepository;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, ChangeSet, NewProduct, Product, ProductChanges, ProductId, ProductSummary};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default deadline for a single cache read or write.
pub const CACHE_OP_TIMEOUT: Duration = Duration::from_millis(250);

/// Repository implementation that coordinates [`ProductDao`] and the cache.
pub struct ProductRepositoryImpl<Tx> {
    product_dao: Arc<dyn ProductDao<Tx>>,
    cache: Arc<dyn CacheInterface>,
    list_ttl: Duration,
    cache_timeout: Duration,
}

impl<Tx: Send> ProductRepositoryImpl<Tx> {
    /// Creates a new `ProductRepositoryImpl`.
    #[must_use]
    pub fn new(product_dao: Arc<dyn ProductDao<Tx>>, cache: Arc<dyn CacheInterface>, list_ttl: Duration) -> Self {
        Self {
            product_dao,
            cache,
            list_ttl,
            cache_timeout: CACHE_OP_TIMEOUT,
        }
    }

    /// Overrides the per-call cache deadline.
    #[must_use]
    pub fn with_cache_timeout(mut self, cache_timeout: Duration) -> Self {
        self.cache_timeout = cache_timeout;
        self
    }

    async fn bounded<T>(&self, call: impl Future<Output = CatalogResult<T>>) -> CatalogResult<T> {
        tokio::time::timeout(self.cache_timeout, call)
            .await
            .map_err(|_| CatalogError::Cache(format!("Cache call timed out after {:?}", self.cache_timeout)))?
    }

    async fn cached_listing(&self) -> Option<Vec<ProductSummary>> {
        let read = self.cache.get::<Vec<ProductSummary>>(cache_keys::PRODUCT_LIST);
        match self.bounded(read).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Ignoring unreadable product listing cache: {}", e);
                None
            }
        }
    }

    async fn store_listing(&self, listing: &[ProductSummary]) {
        let write = self.cache.set(cache_keys::PRODUCT_LIST, &listing, self.list_ttl);
        if let Err(e) = self.bounded(write).await {
            warn!("Failed to cache product listing: {}", e);
        }
    }

    async fn load_listing(&self, tx: &mut Tx) -> CatalogResult<Vec<ProductSummary>> {
        let products = self.product_dao.fetch_all(tx).await?;
        Ok(products.into_iter().map(ProductSummary::from).collect())
    }

    async fn write_changes(&self, tx: &mut Tx, changes: &ProductChanges) -> CatalogResult<Option<ProductId>> {
        let id = changes.id;
        match (changes.change_set(), &changes.name, changes.category_id) {
            (ChangeSet::NameAndCategory, Some(name), Some(category_id)) => {
                self.product_dao
                    .update_name_and_category(tx, id, name, category_id)
                    .await
            }
            (ChangeSet::CategoryOnly, _, Some(category_id)) => {
                self.product_dao.update_category(tx, id, category_id).await
            }
            (ChangeSet::NameOnly, Some(name), _) => self.product_dao.update_name(tx, id, name).await,
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl<Tx: Send + 'static> ProductRepository<Tx> for ProductRepositoryImpl<Tx> {
    async fn save(&self, tx: &mut Tx, product: NewProduct) -> CatalogResult<Product> {
        debug!("Repository: save product {}", product.name);
        let saved = self
            .product_dao
            .insert(tx, &product.name, product.category_id)
            .await?;
        info!("Created product {} in category {}", saved.id, saved.category_id);

        self.refresh_cache(tx).await?;
        Ok(saved)
    }

    async fn update(&self, tx: &mut Tx, changes: ProductChanges) -> CatalogResult<Option<Product>> {
        debug!("Repository: update product {} ({:?})", changes.id, changes.change_set());
        if changes.is_empty() {
            return Ok(None);
        }

        let id = self
            .write_changes(tx, &changes)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", changes.id))?;

        let updated = self
            .product_dao
            .fetch_by_id(tx, id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;
        info!("Updated product {}", id);

        self.refresh_cache(tx).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, tx: &mut Tx, id: ProductId) -> CatalogResult<()> {
        debug!("Repository: delete product {}", id);
        let removed = self.product_dao.delete(tx, id).await?;
        info!("Deleted product {} ({} row(s))", id, removed);

        self.refresh_cache(tx).await?;
        Ok(())
    }

    async fn find_all(&self, tx: &mut Tx) -> CatalogResult<Vec<ProductSummary>> {
        debug!("Repository: find_all products");
        if let Some(listing) = self.cached_listing().await {
            return Ok(listing);
        }

        let listing = self.load_listing(tx).await?;
        self.store_listing(&listing).await;
        Ok(listing)
    }

    async fn find_by_id(&self, tx: &mut Tx, id: ProductId) -> CatalogResult<Product> {
        debug!("Repository: find_by_id product {}", id);
        self.product_dao
            .fetch_by_id(tx, id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    async fn refresh_cache(&self, tx: &mut Tx) -> CatalogResult<Vec<ProductSummary>> {
        let listing = self.load_listing(tx).await?;
        self.store_listing(&listing).await;
        debug!("Refreshed product listing cache ({} entries)", listing.len());
        Ok(listing)
    }
}

impl<Tx> std::fmt::Debug for ProductRepositoryImpl<Tx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductRepositoryImpl")
            .field("list_ttl", &self.list_ttl)
            .field("cache_timeout", &self.cache_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryCache, MemoryDatabase, MemoryProductDao, MemoryTransaction};
    use crate::transaction::Database;
    use catalog_core::Category;

    const TTL: Duration = Duration::from_secs(600);

    struct Fixture {
        db: MemoryDatabase,
        dao: Arc<MemoryProductDao>,
        cache: Arc<MemoryCache>,
        repo: ProductRepositoryImpl<MemoryTransaction>,
        furniture: Category,
        lighting: Category,
    }

    fn fixture() -> Fixture {
        let db = MemoryDatabase::new();
        let furniture = db.seed_category("Furniture");
        let lighting = db.seed_category("Lighting");
        let dao = Arc::new(MemoryProductDao::new());
        let cache = Arc::new(MemoryCache::new());
        let repo = ProductRepositoryImpl::<MemoryTransaction>::new(dao.clone(), cache.clone(), TTL);
        Fixture {
            db,
            dao,
            cache,
            repo,
            furniture,
            lighting,
        }
    }

    fn cached(cache: &MemoryCache) -> Vec<ProductSummary> {
        serde_json::from_str(&cache.peek(cache_keys::PRODUCT_LIST).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_save_returns_joined_row_and_refreshes_cache() {
        let f = fixture();
        let mut tx = f.db.begin().await.unwrap();

        let saved = f
            .repo
            .save(&mut tx, NewProduct::new("Table", f.furniture.id))
            .await
            .unwrap();

        assert_eq!(saved.name, "Table");
        assert_eq!(saved.category_name, "Furniture");
        assert_eq!(cached(&f.cache), vec![ProductSummary::from(saved)]);
        assert!(f.cache.ttl(cache_keys::PRODUCT_LIST).unwrap() > Duration::from_secs(590));
    }

    #[tokio::test]
    async fn test_find_all_serves_cache_without_touching_store() {
        let f = fixture();
        let mut tx = f.db.begin().await.unwrap();
        f.repo
            .save(&mut tx, NewProduct::new("Table", f.furniture.id))
            .await
            .unwrap();
        let queries = f.dao.fetch_all_calls();

        let listing = f.repo.find_all(&mut tx).await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(f.dao.fetch_all_calls(), queries);
    }

    #[tokio::test]
    async fn test_find_all_miss_populates_cache() {
        let f = fixture();
        f.db.seed_product("Lamp", f.lighting.id).unwrap();
        let mut tx = f.db.begin().await.unwrap();

        let listing = f.repo.find_all(&mut tx).await.unwrap();

        assert_eq!(listing[0].category_name, "Lighting");
        assert_eq!(f.dao.fetch_all_calls(), 1);
        assert_eq!(cached(&f.cache), listing);
    }

    #[tokio::test]
    async fn test_find_all_falls_back_on_corrupt_entry() {
        let f = fixture();
        f.db.seed_product("Lamp", f.lighting.id).unwrap();
        f.cache
            .set_raw(cache_keys::PRODUCT_LIST, "{not json", TTL)
            .await
            .unwrap();
        let mut tx = f.db.begin().await.unwrap();

        let listing = f.repo.find_all(&mut tx).await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(cached(&f.cache), listing);
    }

    #[tokio::test]
    async fn test_cache_failures_never_fail_reads_or_writes() {
        let f = fixture();
        f.cache.set_failing(true);
        let mut tx = f.db.begin().await.unwrap();

        let saved = f
            .repo
            .save(&mut tx, NewProduct::new("Table", f.furniture.id))
            .await
            .unwrap();
        let changes = ProductChanges::new(saved.id, Some("Desk".into()), None);
        f.repo.update(&mut tx, changes).await.unwrap();
        assert_eq!(f.repo.find_all(&mut tx).await.unwrap()[0].name, "Desk");
        f.repo.delete(&mut tx, saved.id).await.unwrap();

        assert!(f.repo.find_all(&mut tx).await.unwrap().is_empty());
        assert_eq!(f.cache.writes(), 0);
    }

    /// A cache that accepts calls and never answers.
    struct StalledCache;

    #[async_trait]
    impl CacheInterface for StalledCache {
        async fn get_raw(&self, _key: &str) -> CatalogResult<Option<String>> {
            std::future::pending().await
        }

        async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> CatalogResult<()> {
            std::future::pending().await
        }

        async fn delete(&self, _key: &str) -> CatalogResult<bool> {
            std::future::pending().await
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_unresponsive_cache_is_bounded() {
        let f = fixture();
        let repo = ProductRepositoryImpl::<MemoryTransaction>::new(f.dao.clone(), Arc::new(StalledCache), TTL)
            .with_cache_timeout(Duration::from_millis(20));
        let mut tx = f.db.begin().await.unwrap();

        let calls = async {
            let saved = repo.save(&mut tx, NewProduct::new("Table", f.furniture.id)).await?;
            let listing = repo.find_all(&mut tx).await?;
            Ok::<_, CatalogError>((saved, listing))
        };
        let (saved, listing) = tokio::time::timeout(Duration::from_secs(5), calls)
            .await
            .expect("cache deadline not applied")
            .unwrap();

        assert_eq!(listing, vec![ProductSummary::from(saved)]);
        assert_eq!(f.dao.fetch_all_calls(), 2);
    }

    #[tokio::test]
    async fn test_update_cases() {
        let f = fixture();
        let table = f.db.seed_product("Table", f.furniture.id).unwrap();
        let mut tx = f.db.begin().await.unwrap();

        let renamed = f
            .repo
            .update(&mut tx, ProductChanges::new(table.id, Some("Desk".into()), None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!((renamed.name.as_str(), renamed.category_name.as_str()), ("Desk", "Furniture"));

        let moved = f
            .repo
            .update(&mut tx, ProductChanges::new(table.id, None, Some(f.lighting.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!((moved.name.as_str(), moved.category_name.as_str()), ("Desk", "Lighting"));

        let both = f
            .repo
            .update(
                &mut tx,
                ProductChanges::new(table.id, Some("Lamp".into()), Some(f.furniture.id)),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!((both.name.as_str(), both.category_name.as_str()), ("Lamp", "Furniture"));
        assert_eq!(cached(&f.cache)[0].name, "Lamp");
    }

    #[tokio::test]
    async fn test_empty_update_is_a_no_op() {
        let f = fixture();
        let table = f.db.seed_product("Table", f.furniture.id).unwrap();
        let mut tx = f.db.begin().await.unwrap();

        let result = f
            .repo
            .update(&mut tx, ProductChanges::new(table.id, Some(String::new()), None))
            .await
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(f.cache.writes(), 0);
        assert_eq!(f.dao.fetch_all_calls(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let f = fixture();
        let mut tx = f.db.begin().await.unwrap();

        let err = f
            .repo
            .update(&mut tx, ProductChanges::new(ProductId::new(404), Some("Desk".into()), None))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_refreshes_cache_and_find_by_id_misses() {
        let f = fixture();
        let table = f.db.seed_product("Table", f.furniture.id).unwrap();
        let lamp = f.db.seed_product("Lamp", f.lighting.id).unwrap();
        let mut tx = f.db.begin().await.unwrap();

        f.repo.delete(&mut tx, table.id).await.unwrap();

        assert_eq!(cached(&f.cache), vec![ProductSummary::from(lamp)]);
        let err = f.repo.find_by_id(&mut tx, table.id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Product with id {} not found", table.id));
    }

    #[tokio::test]
    async fn test_find_by_id_ignores_stale_cache() {
        let f = fixture();
        let table = f.db.seed_product("Table", f.furniture.id).unwrap();
        f.cache
            .set(cache_keys::PRODUCT_LIST, &Vec::<ProductSummary>::new(), TTL)
            .await
            .unwrap();
        let mut tx = f.db.begin().await.unwrap();

        assert_eq!(f.repo.find_by_id(&mut tx, table.id).await.unwrap(), table);
        let err = f.repo.find_by_id(&mut tx, ProductId::new(99)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
