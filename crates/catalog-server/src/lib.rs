//! # Catalog Server Library
//!
//! Wiring and startup for the catalog service binary: [`app::AppContext`]
//! builds every component once from configuration, and [`startup`] owns
//! logging, migrations, and the HTTP server lifecycle.

pub mod app;
pub mod startup;
