//! # Catalog Repository
//!
//! Four-layer data access hierarchy:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository<Tx>>   (domain interface)
//! ProductRepositoryImpl                 (repository impl: DAO + cache)
//!   ↓  Arc<dyn ProductDao<Tx>>          (DAO interface)
//! PgProductDao                          (DAO impl: PostgreSQL / SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   transaction.rs                  ← Database trait (transaction boundary)
//!   pool.rs                         ← DatabasePool (PgPool)
//!   traits.rs                       ← ProductRepository, CategoryRepository
//!   impl/                           ← repository implementations
//!   dao/
//!     product_dao.rs, category_dao.rs
//!     impl/postgres/                ← PgProductDao, PgCategoryDao
//!   cache/                          ← CacheInterface, RedisCacheService
//!   memory/                         ← in-memory backend (`inmemory` feature)
//! ```

pub mod cache;
pub mod dao;
pub mod pool;
pub mod traits;
pub mod transaction;
pub mod r#impl;

#[cfg(any(test, feature = "inmemory"))]
pub mod memory;

pub use cache::{CacheExt, CacheInterface, RedisCacheService};
pub use dao::{CategoryDao, PgCategoryDao, PgProductDao, ProductDao};
pub use pool::*;
pub use r#impl::{CategoryRepositoryImpl, ProductRepositoryImpl};
pub use traits::*;
pub use transaction::*;
