//! Category controller.

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
use catalog_core::CategoryId;
use catalog_service::{CategoryRequest, CategoryResponse};
use tracing::debug;

/// Creates the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", get(get_category).patch(update_category).delete(delete_category))
}

/// List all categories.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories, ordered by id", body = [CategoryResponse])
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<CategoryResponse>> {
    debug!("List categories request");

    let categories = state.category_service.find_all().await?;
    ok(categories)
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid body")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> ApiResult<CategoryResponse> {
    debug!("Create category request: {}", request.name);

    let category = state.category_service.create(request).await?;
    created(category)
}

/// Get a category by ID.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CategoryResponse> {
    debug!("Get category request: {}", id);

    let id: CategoryId = parse_id(&id, "category")?;
    let category = state.category_service.find_by_id(id).await?;
    ok(category)
}

/// Rename a category.
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category renamed", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> ApiResult<CategoryResponse> {
    debug!("Update category request: {}", id);

    let id: CategoryId = parse_id(&id, "category")?;
    let category = state.category_service.update(id, request).await?;
    created(category)
}

/// Delete a category that no product references.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by products")
    )
)]
pub async fn delete_category(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    debug!("Delete category request: {}", id);

    let id: CategoryId = parse_id(&id, "category")?;
    state.category_service.delete(id).await?;
    ok_empty()
}
