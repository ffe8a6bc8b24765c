//! Product-related DTOs.

use catalog_core::rules::not_blank;
use catalog_core::{CategoryId, Product, ProductId, ProductSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        length(max = 255, message = "Name cannot exceed 255 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,

    /// Must reference an existing category.
    pub category_id: CategoryId,
}

/// Partial product update. Absent, blank, or zero fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateProductRequest {
    #[validate(length(max = 255, message = "Name cannot exceed 255 characters"))]
    pub name: Option<String>,

    pub category_id: Option<CategoryId>,
}

/// Product projection returned to clients. The raw category id is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub category_name: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category_name: product.category_name,
        }
    }
}

impl From<ProductSummary> for ProductResponse {
    fn from(summary: ProductSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            category_name: summary.category_name,
        }
    }
}
