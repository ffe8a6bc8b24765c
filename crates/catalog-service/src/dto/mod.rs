//! Data Transfer Objects (DTOs).

mod category_dto;
mod product_dto;

pub use category_dto::*;
pub use product_dto::*;
