//! Category-related DTOs.

use catalog_core::rules::not_blank;
use catalog_core::{Category, CategoryId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create or rename a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(
        length(max = 255, message = "Name cannot exceed 255 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
}

/// Category response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
