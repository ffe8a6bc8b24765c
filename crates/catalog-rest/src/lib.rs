//! # Catalog REST
//!
//! REST API layer using Axum for the catalog service.
//! Provides HTTP endpoints for products, categories, and health checks.
//! Every body is wrapped in the `{status_code, data}` envelope from
//! [`responses`], and [`responses::AppError`] is the single place where
//! `CatalogError` becomes an HTTP status.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
