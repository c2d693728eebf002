//! User admin handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::handlers::AppState;
use crate::models::user::{NewUserRequest, UserDto};
use crate::utils::errors::EwmError;
use crate::utils::helpers::{parse_comma_list, Pagination};

#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    pub ids: Option<String>,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

/// Handler for GET `/admin/users`
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserDto>>, EwmError> {
    let ids: Vec<i64> = parse_comma_list(query.ids.as_deref())?;
    let page = Pagination::new(query.from, query.size)?;
    let users = state.services.user_service.get_users(&ids, page).await?;
    Ok(Json(users))
}

/// Handler for POST `/admin/users`
pub async fn post_user(
    State(state): State<AppState>,
    Json(request): Json<NewUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), EwmError> {
    info!(name = %request.name, "Handling create user request");
    let user = state.services.user_service.post_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for DELETE `/admin/users/{user_id}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, EwmError> {
    info!(user_id = user_id, "Handling delete user request");
    state.services.user_service.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
