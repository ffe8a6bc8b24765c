//! DAO (Data Access Object) layer.
//!
//! DAOs run parameterized SQL against one table family inside a
//! transaction supplied by the caller. They own no transaction lifecycle.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod category_dao;
pub mod r#impl;
pub mod product_dao;

pub use category_dao::CategoryDao;
pub use r#impl::{PgCategoryDao, PgProductDao};
pub use product_dao::ProductDao;
