//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use catalog_config::RedisConfig;
use catalog_core::{CatalogError, CatalogResult};
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default lifetime of the cached product listing (10 minutes).
pub const PRODUCT_LIST_TTL: Duration = Duration::from_secs(600);

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    ///
    /// Every read misses and every write is accepted and discarded.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Builds the cache from configuration, disabled when `redis.enabled` is false.
    pub fn from_config(config: &RedisConfig) -> CatalogResult<Self> {
        if !config.enabled {
            info!("Redis cache disabled by configuration");
            return Ok(Self::disabled());
        }
        Ok(Self::new(Arc::new(create_redis_pool(config)?)))
    }

    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| CatalogError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(CatalogError::Cache("Cache is disabled".to_string())),
        }
    }
}

/// Creates a Redis connection pool.
///
/// Connections are opened lazily, so an unreachable Redis does not stop startup.
pub fn create_redis_pool(config: &RedisConfig) -> CatalogResult<Pool> {
    info!("Creating Redis connection pool for the cache...");

    Config::from_url(&config.url)
        .builder()
        .map_err(|e| CatalogError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| CatalogError::Configuration(format!("Failed to create Redis pool: {}", e)))
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
