//! In-memory database, DAOs, and cache (for testing).
//!
//! [`MemoryDatabase`] hands out snapshot transactions: `begin` clones the
//! committed tables, `commit` writes the snapshot back, and dropping or
//! rolling back discards it. Foreign keys are enforced the way Postgres
//! does, so constraint failures surface as `Conflict`.

use crate::cache::CacheInterface;
use crate::dao::{CategoryDao, ProductDao};
use crate::transaction::Database;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Category, CategoryId, Product, ProductId};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Category and product tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    categories: BTreeMap<i32, String>,
    products: BTreeMap<i32, (String, i32)>,
    last_category_id: i32,
    last_product_id: i32,
}

impl MemoryTables {
    fn insert_category(&mut self, name: &str) -> Category {
        self.last_category_id += 1;
        self.categories.insert(self.last_category_id, name.to_string());
        Category::new(CategoryId::new(self.last_category_id), name)
    }

    fn insert_product(&mut self, name: &str, category_id: CategoryId) -> CatalogResult<Product> {
        self.check_category(category_id)?;
        self.last_product_id += 1;
        self.products
            .insert(self.last_product_id, (name.to_string(), category_id.into_inner()));
        self.product(ProductId::new(self.last_product_id))
            .ok_or_else(|| CatalogError::internal("inserted product vanished"))
    }

    fn check_category(&self, id: CategoryId) -> CatalogResult<()> {
        if self.categories.contains_key(&id.into_inner()) {
            Ok(())
        } else {
            Err(CatalogError::Conflict(format!(
                "insert or update on table \"product\" violates foreign key constraint (category_id={})",
                id
            )))
        }
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        let (name, category_id) = self.products.get(&id.into_inner())?;
        let category_name = self.categories.get(category_id)?;
        Some(Product {
            id,
            name: name.clone(),
            category_id: CategoryId::new(*category_id),
            category_name: category_name.clone(),
        })
    }

    fn all_products(&self) -> Vec<Product> {
        self.products
            .keys()
            .filter_map(|id| self.product(ProductId::new(*id)))
            .collect()
    }
}

/// Snapshot transaction over [`MemoryTables`].
#[derive(Debug)]
pub struct MemoryTransaction {
    tables: MemoryTables,
}

/// In-memory [`Database`] with commit and rollback counters.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    committed: Mutex<MemoryTables>,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl MemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a committed category.
    pub fn seed_category(&self, name: &str) -> Category {
        lock(&self.committed).insert_category(name)
    }

    /// Inserts a committed product.
    pub fn seed_product(&self, name: &str, category_id: CategoryId) -> CatalogResult<Product> {
        lock(&self.committed).insert_product(name, category_id)
    }

    /// Committed products ordered by id.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.committed).all_products()
    }

    /// Committed categories ordered by id.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        lock(&self.committed)
            .categories
            .iter()
            .map(|(id, name)| Category::new(CategoryId::new(*id), name.clone()))
            .collect()
    }

    /// Number of committed transactions.
    #[must_use]
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Number of explicit rollbacks.
    #[must_use]
    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> CatalogResult<MemoryTransaction> {
        Ok(MemoryTransaction {
            tables: lock(&self.committed).clone(),
        })
    }

    async fn commit(&self, tx: MemoryTransaction) -> CatalogResult<()> {
        *lock(&self.committed) = tx.tables;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self, _tx: MemoryTransaction) -> CatalogResult<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory product DAO. Counts full-listing queries.
#[derive(Debug, Default)]
pub struct MemoryProductDao {
    fetch_all_calls: AtomicUsize,
}

impl MemoryProductDao {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `fetch_all` queries served.
    #[must_use]
    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    fn set(
        tx: &mut MemoryTransaction,
        id: ProductId,
        name: Option<&str>,
        category_id: Option<CategoryId>,
    ) -> CatalogResult<Option<ProductId>> {
        if let Some(category_id) = category_id {
            tx.tables.check_category(category_id)?;
        }
        let Some(row) = tx.tables.products.get_mut(&id.into_inner()) else {
            return Ok(None);
        };
        if let Some(name) = name {
            row.0 = name.to_string();
        }
        if let Some(category_id) = category_id {
            row.1 = category_id.into_inner();
        }
        Ok(Some(id))
    }
}

#[async_trait]
impl ProductDao<MemoryTransaction> for MemoryProductDao {
    async fn insert(&self, tx: &mut MemoryTransaction, name: &str, category_id: CategoryId) -> CatalogResult<Product> {
        tx.tables.insert_product(name, category_id)
    }

    async fn update_name_and_category(
        &self,
        tx: &mut MemoryTransaction,
        id: ProductId,
        name: &str,
        category_id: CategoryId,
    ) -> CatalogResult<Option<ProductId>> {
        Self::set(tx, id, Some(name), Some(category_id))
    }

    async fn update_category(
        &self,
        tx: &mut MemoryTransaction,
        id: ProductId,
        category_id: CategoryId,
    ) -> CatalogResult<Option<ProductId>> {
        Self::set(tx, id, None, Some(category_id))
    }

    async fn update_name(&self, tx: &mut MemoryTransaction, id: ProductId, name: &str) -> CatalogResult<Option<ProductId>> {
        Self::set(tx, id, Some(name), None)
    }

    async fn fetch_by_id(&self, tx: &mut MemoryTransaction, id: ProductId) -> CatalogResult<Option<Product>> {
        Ok(tx.tables.product(id))
    }

    async fn fetch_all(&self, tx: &mut MemoryTransaction) -> CatalogResult<Vec<Product>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(tx.tables.all_products())
    }

    async fn delete(&self, tx: &mut MemoryTransaction, id: ProductId) -> CatalogResult<u64> {
        Ok(u64::from(tx.tables.products.remove(&id.into_inner()).is_some()))
    }
}

/// In-memory category DAO.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCategoryDao;

#[async_trait]
impl CategoryDao<MemoryTransaction> for MemoryCategoryDao {
    async fn insert(&self, tx: &mut MemoryTransaction, name: &str) -> CatalogResult<Category> {
        Ok(tx.tables.insert_category(name))
    }

    async fn update(&self, tx: &mut MemoryTransaction, id: CategoryId, name: &str) -> CatalogResult<Option<Category>> {
        Ok(tx.tables.categories.get_mut(&id.into_inner()).map(|stored| {
            *stored = name.to_string();
            Category::new(id, name)
        }))
    }

    async fn delete(&self, tx: &mut MemoryTransaction, id: CategoryId) -> CatalogResult<u64> {
        let raw = id.into_inner();
        if tx.tables.products.values().any(|(_, category_id)| *category_id == raw) {
            return Err(CatalogError::Conflict(format!(
                "update or delete on table \"category\" violates foreign key constraint (id={})",
                id
            )));
        }
        Ok(u64::from(tx.tables.categories.remove(&raw).is_some()))
    }

    async fn fetch_by_id(&self, tx: &mut MemoryTransaction, id: CategoryId) -> CatalogResult<Option<Category>> {
        Ok(tx
            .tables
            .categories
            .get(&id.into_inner())
            .map(|name| Category::new(id, name.clone())))
    }

    async fn fetch_all(&self, tx: &mut MemoryTransaction) -> CatalogResult<Vec<Category>> {
        Ok(tx
            .tables
            .categories
            .iter()
            .map(|(id, name)| Category::new(CategoryId::new(*id), name.clone()))
            .collect())
    }
}

/// In-memory cache with TTL and a switch that makes every call fail.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `CatalogError::Cache` (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Stored value for `key`, ignoring expiry and the failure switch.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).map(|(value, _)| value.clone())
    }

    /// Remaining lifetime of `key`.
    #[must_use]
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        lock(&self.entries)
            .get(key)
            .map(|(_, expires_at)| expires_at.saturating_duration_since(Instant::now()))
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> CatalogResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CatalogError::Cache("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheInterface for MemoryCache {
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        self.check()?;
        let mut entries = lock(&self.entries);
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        self.check()?;
        lock(&self.entries).insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<bool> {
        self.check()?;
        Ok(lock(&self.entries).remove(key).is_some())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Shared handles to a fresh in-memory backend.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    pub database: Arc<MemoryDatabase>,
    pub product_dao: Arc<MemoryProductDao>,
    pub category_dao: Arc<MemoryCategoryDao>,
    pub cache: Arc<MemoryCache>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            database: Arc::new(MemoryDatabase::new()),
            product_dao: Arc::new(MemoryProductDao::new()),
            category_dao: Arc::new(MemoryCategoryDao),
            cache: Arc::new(MemoryCache::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let db = MemoryDatabase::new();
        let category = db.seed_category("Furniture");

        let mut tx = db.begin().await.unwrap();
        MemoryProductDao::new()
            .insert(&mut tx, "Table", category.id)
            .await
            .unwrap();
        drop(tx);

        assert!(db.products().is_empty());
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let db = MemoryDatabase::new();
        let category = db.seed_category("Furniture");

        let mut tx = db.begin().await.unwrap();
        let product = MemoryProductDao::new()
            .insert(&mut tx, "Table", category.id)
            .await
            .unwrap();
        db.commit(tx).await.unwrap();

        assert_eq!(db.products(), vec![product]);
        assert_eq!(db.commits(), 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let db = MemoryDatabase::new();
        let category = db.seed_category("Furniture");
        db.seed_product("Table", category.id).unwrap();

        let mut tx = db.begin().await.unwrap();
        let err = MemoryProductDao::new()
            .insert(&mut tx, "Lamp", CategoryId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));

        let err = MemoryCategoryDao.delete(&mut tx, category.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cache_expiry_and_failure_switch() {
        let cache = MemoryCache::new();
        cache.set_raw("k", "v", Duration::ZERO).await.unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap(), None);

        cache.set_failing(true);
        assert!(cache.get_raw("k").await.is_err());
        assert!(cache.set_raw("k", "v", Duration::from_secs(1)).await.is_err());
    }
}
