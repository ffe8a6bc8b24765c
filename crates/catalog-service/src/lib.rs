//! # Catalog Service
//!
//! Business logic layer for the catalog service. Each service call owns one
//! [`UnitOfWork`]: it opens a transaction, checks references, delegates to
//! the repositories, and commits or rolls back on the way out.

pub mod category_service;
pub mod dto;
pub mod r#impl;
pub mod product_service;
pub mod unit_of_work;

pub use category_service::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::{CategoryServiceImpl, ProductServiceImpl};
pub use unit_of_work::*;
