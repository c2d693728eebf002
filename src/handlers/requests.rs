//! Participation request handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::handlers::AppState;
use crate::models::request::ParticipationRequestDto;
use crate::utils::errors::EwmError;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NewRequestQuery {
    #[serde(rename = "eventId")]
    pub event_id: i64,
}

/// Handler for GET `/users/{user_id}/requests`
pub async fn get_requests(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ParticipationRequestDto>>, EwmError> {
    let requests = state
        .services
        .request_service
        .get_requests_by_user(user_id)
        .await?;
    Ok(Json(requests))
}

/// Handler for POST `/users/{user_id}/requests?eventId=`
pub async fn post_request(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<NewRequestQuery>,
) -> Result<(StatusCode, Json<ParticipationRequestDto>), EwmError> {
    info!(user_id = user_id, event_id = query.event_id, "Handling create request");
    let request = state
        .services
        .request_service
        .create_request(user_id, query.event_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Handler for PATCH `/users/{user_id}/requests/{request_id}/cancel`
pub async fn cancel_request(
    State(state): State<AppState>,
    Path((user_id, request_id)): Path<(i64, i64)>,
) -> Result<Json<ParticipationRequestDto>, EwmError> {
    info!(user_id = user_id, request_id = request_id, "Handling cancel request");
    let request = state
        .services
        .request_service
        .cancel_request(user_id, request_id)
        .await?;
    Ok(Json(request))
}
