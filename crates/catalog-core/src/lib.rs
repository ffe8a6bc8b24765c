//! # Catalog Core
//!
//! Core types, entities, and error definitions for the catalog service.
//! Every other crate in the workspace builds on the types defined here.

pub mod entities;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use entities::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
