//! Caching infrastructure for the repository layer.
//!
//! The cache is a best-effort read accelerator. Repositories treat every
//! cache failure as a miss and never let it reach the caller.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{create_redis_pool, RedisCacheService, PRODUCT_LIST_TTL};
