//! Compilation handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::handlers::AppState;
use crate::models::compilation::{CompilationDto, NewCompilationDto, UpdateCompilationRequest};
use crate::utils::errors::EwmError;
use crate::utils::helpers::Pagination;

#[derive(Debug, Clone, Deserialize)]
pub struct CompilationListQuery {
    pub pinned: Option<bool>,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

/// Handler for GET `/compilations`
pub async fn get_compilations(
    State(state): State<AppState>,
    Query(query): Query<CompilationListQuery>,
) -> Result<Json<Vec<CompilationDto>>, EwmError> {
    let page = Pagination::new(query.from, query.size)?;
    let compilations = state
        .services
        .compilation_service
        .get_compilations(query.pinned, page)
        .await?;
    Ok(Json(compilations))
}

/// Handler for GET `/compilations/{comp_id}`
pub async fn get_compilation(
    State(state): State<AppState>,
    Path(comp_id): Path<i64>,
) -> Result<Json<CompilationDto>, EwmError> {
    let compilation = state
        .services
        .compilation_service
        .get_compilation(comp_id)
        .await?;
    Ok(Json(compilation))
}

/// Handler for POST `/admin/compilations`
pub async fn post_compilation(
    State(state): State<AppState>,
    Json(dto): Json<NewCompilationDto>,
) -> Result<(StatusCode, Json<CompilationDto>), EwmError> {
    info!(title = %dto.title, "Handling create compilation request");
    let compilation = state
        .services
        .compilation_service
        .post_compilation(dto)
        .await?;
    Ok((StatusCode::CREATED, Json(compilation)))
}

/// Handler for DELETE `/admin/compilations/{comp_id}`
pub async fn delete_compilation(
    State(state): State<AppState>,
    Path(comp_id): Path<i64>,
) -> Result<StatusCode, EwmError> {
    info!(compilation_id = comp_id, "Handling delete compilation request");
    state
        .services
        .compilation_service
        .delete_compilation(comp_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PATCH `/admin/compilations/{comp_id}`
pub async fn patch_compilation(
    State(state): State<AppState>,
    Path(comp_id): Path<i64>,
    Json(request): Json<UpdateCompilationRequest>,
) -> Result<Json<CompilationDto>, EwmError> {
    info!(compilation_id = comp_id, "Handling update compilation request");
    let compilation = state
        .services
        .compilation_service
        .patch_compilation(comp_id, request)
        .await?;
    Ok(Json(compilation))
}
