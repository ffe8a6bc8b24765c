//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module.
//! Implementations are organized by technology.

pub mod postgres;

pub use postgres::{PgCategoryDao, PgProductDao};
