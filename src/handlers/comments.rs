//! Comment handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::handlers::AppState;
use crate::models::comment::{CommentDto, NewCommentDto};
use crate::utils::errors::EwmError;

/// Handler for POST `/users/{user_id}/events/{event_id}/comments`
pub async fn post_comment(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
    Json(dto): Json<NewCommentDto>,
) -> Result<(StatusCode, Json<CommentDto>), EwmError> {
    info!(user_id = user_id, event_id = event_id, "Handling create comment request");
    let comment = state
        .services
        .comment_service
        .post_comment(user_id, event_id, dto)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Handler for PATCH `/users/{user_id}/comments/{comment_id}`
pub async fn patch_comment(
    State(state): State<AppState>,
    Path((user_id, comment_id)): Path<(i64, i64)>,
    Json(dto): Json<NewCommentDto>,
) -> Result<Json<CommentDto>, EwmError> {
    info!(user_id = user_id, comment_id = comment_id, "Handling update comment request");
    let comment = state
        .services
        .comment_service
        .patch_comment(user_id, comment_id, dto)
        .await?;
    Ok(Json(comment))
}

/// Handler for DELETE `/users/{user_id}/comments/{comment_id}`
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((user_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, EwmError> {
    info!(user_id = user_id, comment_id = comment_id, "Handling delete comment request");
    state
        .services
        .comment_service
        .delete_comment(user_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE `/admin/comments/{comment_id}`
pub async fn delete_comment_by_admin(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, EwmError> {
    info!(comment_id = comment_id, "Handling admin delete comment request");
    state
        .services
        .comment_service
        .delete_comment_by_admin(comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/events/{event_id}/comments`
pub async fn get_comments(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<CommentDto>>, EwmError> {
    let comments = state.services.comment_service.get_comments(event_id).await?;
    Ok(Json(comments))
}
