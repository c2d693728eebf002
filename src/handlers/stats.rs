//! Stats service handlers
//!
//! The statistics service exposes exactly two operations: `POST /hit`
//! appends one row to the hit log, `GET /stats` serves the aggregate.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::models::stats::{EndpointHitDto, ViewStats};
use crate::services::StatsService;
use crate::utils::errors::EwmError;
use crate::utils::helpers::parse_comma_list;

/// Application state of the stats service
#[derive(Clone)]
pub struct StatsAppState {
    pub stats_service: StatsService,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewStatsQuery {
    pub start: String,
    pub end: String,
    pub uris: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

/// Build the stats service router
pub fn stats_router(state: StatsAppState) -> Router {
    Router::new()
        .route("/hit", post(post_hit))
        .route("/stats", get(get_view_stats))
        .with_state(state)
}

/// Handler for POST `/hit`
pub async fn post_hit(
    State(state): State<StatsAppState>,
    Json(dto): Json<EndpointHitDto>,
) -> Result<(StatusCode, Json<EndpointHitDto>), EwmError> {
    info!(app = %dto.app, uri = %dto.uri, "Handling record hit request");
    let hit = state.stats_service.record_hit(dto).await?;
    Ok((StatusCode::CREATED, Json(EndpointHitDto::from(&hit))))
}

/// Handler for GET `/stats?start=&end=&uris=&unique=`
pub async fn get_view_stats(
    State(state): State<StatsAppState>,
    Query(query): Query<ViewStatsQuery>,
) -> Result<Json<Vec<ViewStats>>, EwmError> {
    let uri_prefixes: Vec<String> = parse_comma_list(query.uris.as_deref())?;
    let stats = state
        .stats_service
        .view_stats(&query.start, &query.end, &uri_prefixes, query.unique)
        .await?;
    Ok(Json(stats))
}
