//! Event handlers: initiator, admin and public surfaces

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use tracing::info;

use crate::handlers::{AppState, ClientIp, PageQuery};
use crate::models::event::{
    EventFullDto, EventShortDto, NewEventDto, UpdateEventAdminRequest, UpdateEventUserRequest,
};
use crate::models::request::{
    EventRequestStatusUpdateRequest, EventRequestStatusUpdateResult, ParticipationRequestDto,
};
use crate::services::{AdminSearchParams, PublicSearchParams};
use crate::utils::errors::EwmError;

/// Handler for GET `/users/{user_id}/events`
pub async fn get_events_by_initiator(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<EventShortDto>>, EwmError> {
    let events = state
        .services
        .event_service
        .get_events_by_initiator(user_id, page.pagination()?)
        .await?;
    Ok(Json(events))
}

/// Handler for POST `/users/{user_id}/events`
pub async fn post_event(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(dto): Json<NewEventDto>,
) -> Result<(StatusCode, Json<EventFullDto>), EwmError> {
    info!(user_id = user_id, title = %dto.title, "Handling create event request");
    let event = state.services.event_service.post_event(user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Handler for GET `/users/{user_id}/events/{event_id}`
pub async fn get_event_by_initiator(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Result<Json<EventFullDto>, EwmError> {
    let event = state
        .services
        .event_service
        .get_event_by_initiator(user_id, event_id)
        .await?;
    Ok(Json(event))
}

/// Handler for PATCH `/users/{user_id}/events/{event_id}`
pub async fn patch_event_by_initiator(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateEventUserRequest>,
) -> Result<Json<EventFullDto>, EwmError> {
    info!(user_id = user_id, event_id = event_id, "Handling initiator event update");
    let event = state
        .services
        .event_service
        .update_event_by_initiator(user_id, event_id, request)
        .await?;
    Ok(Json(event))
}

/// Handler for GET `/users/{user_id}/events/{event_id}/requests`
pub async fn get_event_requests(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<ParticipationRequestDto>>, EwmError> {
    let requests = state
        .services
        .event_service
        .get_event_requests(user_id, event_id)
        .await?;
    Ok(Json(requests))
}

/// Handler for PATCH `/users/{user_id}/events/{event_id}/requests`
pub async fn patch_request_statuses(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(i64, i64)>,
    Json(request): Json<EventRequestStatusUpdateRequest>,
) -> Result<Json<EventRequestStatusUpdateResult>, EwmError> {
    info!(
        user_id = user_id,
        event_id = event_id,
        request_count = request.request_ids.len(),
        status = %request.status,
        "Handling request status update"
    );
    let result = state
        .services
        .event_service
        .update_request_statuses(user_id, event_id, request)
        .await?;
    Ok(Json(result))
}

/// Handler for GET `/admin/events`
pub async fn get_events_admin(
    State(state): State<AppState>,
    Query(params): Query<AdminSearchParams>,
) -> Result<Json<Vec<EventFullDto>>, EwmError> {
    let events = state.services.event_service.search_admin(params).await?;
    Ok(Json(events))
}

/// Handler for PATCH `/admin/events/{event_id}`
pub async fn patch_event_admin(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(request): Json<UpdateEventAdminRequest>,
) -> Result<Json<EventFullDto>, EwmError> {
    info!(event_id = event_id, "Handling admin event update");
    let event = state
        .services
        .event_service
        .update_event_by_admin(event_id, request)
        .await?;
    Ok(Json(event))
}

/// Handler for GET `/events`
pub async fn get_events_public(
    State(state): State<AppState>,
    Query(params): Query<PublicSearchParams>,
    uri: Uri,
    ClientIp(ip): ClientIp,
) -> Result<Json<Vec<EventShortDto>>, EwmError> {
    let events = state
        .services
        .event_service
        .search_public(params, uri.path(), &ip)
        .await?;
    Ok(Json(events))
}

/// Handler for GET `/events/{event_id}`
pub async fn get_event_public(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    uri: Uri,
    ClientIp(ip): ClientIp,
) -> Result<Json<EventFullDto>, EwmError> {
    let event = state
        .services
        .event_service
        .get_published_event(event_id, uri.path(), &ip)
        .await?;
    Ok(Json(event))
}
