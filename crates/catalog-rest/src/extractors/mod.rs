//! Custom Axum extractors.

mod path_id;
mod validated;

pub use path_id::*;
pub use validated::*;
