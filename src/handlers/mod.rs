//! HTTP handlers module
//!
//! Axum routers and handler functions for both services. Handlers stay thin:
//! they extract and log, delegate to a service, and let `EwmError` carry the
//! status-code mapping back to the client.

pub mod categories;
pub mod comments;
pub mod compilations;
pub mod events;
pub mod requests;
pub mod stats;
pub mod users;

use std::net::SocketAddr;

use axum::extract::connect_info::ConnectInfo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use serde::Deserialize;

use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::Pagination;

/// Application state shared across the main service's handlers
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
}

/// Common `from`/`size` pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

impl PageQuery {
    pub fn pagination(&self) -> Result<Pagination> {
        Pagination::new(self.from, self.size)
    }
}

/// Client address for hit recording. Falls back from the socket address to
/// `X-Forwarded-For`, then to a placeholder, so handlers never fail on it.
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|connect_info| connect_info.0.ip().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get("x-forwarded-for")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.split(',').next())
                    .map(|value| value.trim().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());
        Ok(ClientIp(ip))
    }
}

/// Build the main service router
pub fn app_router(state: AppState) -> Router {
    Router::new()
        // categories
        .route("/admin/categories", post(categories::post_category))
        .route(
            "/admin/categories/{cat_id}",
            patch(categories::patch_category).delete(categories::delete_category),
        )
        .route("/categories", get(categories::get_categories))
        .route("/categories/{cat_id}", get(categories::get_category))
        // users
        .route("/admin/users", get(users::get_users).post(users::post_user))
        .route("/admin/users/{user_id}", delete(users::delete_user))
        // compilations
        .route("/compilations", get(compilations::get_compilations))
        .route("/compilations/{comp_id}", get(compilations::get_compilation))
        .route("/admin/compilations", post(compilations::post_compilation))
        .route(
            "/admin/compilations/{comp_id}",
            patch(compilations::patch_compilation).delete(compilations::delete_compilation),
        )
        // events: initiator surface
        .route(
            "/users/{user_id}/events",
            get(events::get_events_by_initiator).post(events::post_event),
        )
        .route(
            "/users/{user_id}/events/{event_id}",
            get(events::get_event_by_initiator).patch(events::patch_event_by_initiator),
        )
        .route(
            "/users/{user_id}/events/{event_id}/requests",
            get(events::get_event_requests).patch(events::patch_request_statuses),
        )
        // events: admin surface
        .route("/admin/events", get(events::get_events_admin))
        .route("/admin/events/{event_id}", patch(events::patch_event_admin))
        // events: public surface
        .route("/events", get(events::get_events_public))
        .route("/events/{event_id}", get(events::get_event_public))
        // participation requests
        .route(
            "/users/{user_id}/requests",
            get(requests::get_requests).post(requests::post_request),
        )
        .route(
            "/users/{user_id}/requests/{request_id}/cancel",
            patch(requests::cancel_request),
        )
        // comments
        .route(
            "/users/{user_id}/events/{event_id}/comments",
            post(comments::post_comment),
        )
        .route(
            "/users/{user_id}/comments/{comment_id}",
            patch(comments::patch_comment).delete(comments::delete_comment),
        )
        .route("/admin/comments/{comment_id}", delete(comments::delete_comment_by_admin))
        .route("/events/{event_id}/comments", get(comments::get_comments))
        .with_state(state)
}
