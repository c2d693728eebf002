//! Category handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::handlers::{AppState, PageQuery};
use crate::models::category::{CategoryDto, NewCategoryDto};
use crate::utils::errors::EwmError;

/// Handler for POST `/admin/categories`
pub async fn post_category(
    State(state): State<AppState>,
    Json(dto): Json<NewCategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), EwmError> {
    info!(name = %dto.name, "Handling create category request");
    let category = state.services.category_service.post_category(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for PATCH `/admin/categories/{cat_id}`
pub async fn patch_category(
    State(state): State<AppState>,
    Path(cat_id): Path<i64>,
    Json(dto): Json<NewCategoryDto>,
) -> Result<Json<CategoryDto>, EwmError> {
    info!(category_id = cat_id, "Handling update category request");
    let category = state
        .services
        .category_service
        .patch_category(cat_id, dto)
        .await?;
    Ok(Json(category))
}

/// Handler for DELETE `/admin/categories/{cat_id}`
pub async fn delete_category(
    State(state): State<AppState>,
    Path(cat_id): Path<i64>,
) -> Result<StatusCode, EwmError> {
    info!(category_id = cat_id, "Handling delete category request");
    state.services.category_service.delete_category(cat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/categories`
pub async fn get_categories(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<CategoryDto>>, EwmError> {
    let categories = state
        .services
        .category_service
        .get_categories(page.pagination()?)
        .await?;
    Ok(Json(categories))
}

/// Handler for GET `/categories/{cat_id}`
pub async fn get_category(
    State(state): State<AppState>,
    Path(cat_id): Path<i64>,
) -> Result<Json<CategoryDto>, EwmError> {
    let category = state.services.category_service.get_category(cat_id).await?;
    Ok(Json(category))
}
