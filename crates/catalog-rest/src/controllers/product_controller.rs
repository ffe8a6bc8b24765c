//! Product controller.

use crate::{
    extractors::{parse_id, ValidatedJson},
    responses::{created, ok, ok_empty, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use catalog_core::ProductId;
use catalog_service::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).patch(update_product).delete(delete_product))
}

/// List all products.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products, ordered by id", body = [ProductResponse])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductResponse>> {
    debug!("List products request");

    let products = state.product_service.find_all().await?;
    ok(products)
}

/// Create a product in an existing category.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid body"),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create(request).await?;
    created(product)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);

    let id: ProductId = parse_id(&id, "product")?;
    let product = state.product_service.find_by_id(id).await?;
    ok(product)
}

/// Partially update a product.
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 201, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Unknown product or category")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);

    let id: ProductId = parse_id(&id, "product")?;
    let product = state.product_service.update(id, request).await?;
    created(product)
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    debug!("Delete product request: {}", id);

    let id: ProductId = parse_id(&id, "product")?;
    state.product_service.delete(id).await?;
    ok_empty()
}
