//! Repository layer implementations.
//!
//! Trait definitions live in the parent module (`traits.rs`).
//! This module contains concrete structs that implement those traits.

pub mod category_repository_impl;
pub mod product_repository_impl;

pub use category_repository_impl::CategoryRepositoryImpl;
pub use product_repository_impl::ProductRepositoryImpl;
