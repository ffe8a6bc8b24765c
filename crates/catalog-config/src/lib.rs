//! # Catalog Config
//!
//! Configuration management for the catalog service.
//! Supports layered configuration from files, `.env`, and environment
//! variables, validated once at startup.

mod app_config;
mod execution;
mod loader;
mod validation;

pub use app_config::*;
pub use execution::*;
pub use loader::*;
pub use validation::*;
