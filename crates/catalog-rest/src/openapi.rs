//! OpenAPI documentation configuration.
//!
//! Served as JSON at `/api-docs/openapi.json` and browsable at `/swagger-ui`.

use crate::controllers::HealthResponse;
use catalog_core::{CategoryId, ProductId};
use catalog_service::{CategoryRequest, CategoryResponse, CreateProductRequest, ProductResponse, UpdateProductRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Products and categories. Every body is wrapped as {\"status_code\": int, \"data\": payload | null}.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        // Category endpoints
        crate::controllers::category_controller::list_categories,
        crate::controllers::category_controller::create_category,
        crate::controllers::category_controller::get_category,
        crate::controllers::category_controller::update_category,
        crate::controllers::category_controller::delete_category,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductId,
            CategoryId,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            CategoryRequest,
            CategoryResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "products", description = "Product management endpoints"),
        (name = "categories", description = "Category management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/products", "/products/{id}", "/categories", "/categories/{id}", "/ready"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
