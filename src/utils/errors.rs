//! Error handling for EWM
//!
//! This module defines the main error type used throughout the application
//! and the mapping from domain errors to HTTP responses. Every domain error
//! is raised at the point of detection and surfaces unchanged to the axum
//! boundary, which maps it to a status code and a plain `{"message"}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the EWM application
#[derive(Error, Debug)]
pub enum EwmError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User with id={user_id} was not found")]
    UserNotFound { user_id: i64 },

    #[error("Category with id={category_id} was not found")]
    CategoryNotFound { category_id: i64 },

    #[error("Event with id={event_id} was not found")]
    EventNotFound { event_id: i64 },

    #[error("Request with id={request_id} was not found")]
    RequestNotFound { request_id: i64 },

    #[error("Compilation with id={compilation_id} was not found")]
    CompilationNotFound { compilation_id: i64 },

    #[error("Comment with id={comment_id} was not found")]
    CommentNotFound { comment_id: i64 },

    #[error("Category name '{0}' is already taken")]
    DuplicateCategoryName(String),

    #[error("User name '{0}' is already taken")]
    DuplicateUserName(String),

    #[error("Category is not empty: events still reference it")]
    CategoryNotEmpty,

    #[error("User with id={user_id} is not the initiator of event with id={event_id}")]
    NotInitiator { user_id: i64, event_id: i64 },

    #[error("Cannot modify a published event")]
    PublishedEventImmutable,

    #[error("Participant limit cannot be lower than the confirmed request count")]
    ParticipantLimitBelowConfirmed,

    #[error("The participant limit has been reached")]
    ParticipantLimitReached,

    #[error("Request status is not pending")]
    RequestNotPending,

    #[error("Review status must be CONFIRMED or REJECTED")]
    StatusNotConfirmedOrRejected,

    #[error("An active request for this event already exists")]
    DuplicateRequest,

    #[error("The initiator cannot request participation in their own event")]
    SelfParticipation,

    #[error("Cannot participate in an unpublished event")]
    EventNotPublished,

    #[error("There is no empty place left in the event")]
    NoFreeSlots,

    #[error("Only pending events can be published or rejected")]
    EventStateFinal,

    #[error("User with id={user_id} is not the author of comment with id={comment_id}")]
    NotCommentAuthor { user_id: i64, comment_id: i64 },

    #[error("Event date must be at least {min_hours_ahead} hours in the future")]
    InvalidEventDate { min_hours_ahead: i64 },

    #[error("Range end must be after range start")]
    InvalidDateRange,

    #[error("Unknown state action: {0}")]
    InvalidStateAction(String),

    #[error("Unknown request status: {0}")]
    InvalidRequestStatus(String),

    #[error("Unknown event state: {0}")]
    InvalidEventState(String),

    #[error("Failed to parse date-time '{0}', expected yyyy-MM-dd HH:mm:ss")]
    InvalidDateTime(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for EWM operations
pub type Result<T> = std::result::Result<T, EwmError>;

/// Error body returned by both services: `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl EwmError {
    /// HTTP status code the error maps to at the service boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            EwmError::UserNotFound { .. }
            | EwmError::CategoryNotFound { .. }
            | EwmError::EventNotFound { .. }
            | EwmError::RequestNotFound { .. }
            | EwmError::CompilationNotFound { .. }
            | EwmError::CommentNotFound { .. } => StatusCode::NOT_FOUND,

            EwmError::DuplicateCategoryName(_)
            | EwmError::DuplicateUserName(_)
            | EwmError::CategoryNotEmpty
            | EwmError::NotInitiator { .. }
            | EwmError::PublishedEventImmutable
            | EwmError::ParticipantLimitBelowConfirmed
            | EwmError::ParticipantLimitReached
            | EwmError::RequestNotPending
            | EwmError::StatusNotConfirmedOrRejected
            | EwmError::DuplicateRequest
            | EwmError::SelfParticipation
            | EwmError::EventNotPublished
            | EwmError::NoFreeSlots
            | EwmError::EventStateFinal
            | EwmError::NotCommentAuthor { .. } => StatusCode::CONFLICT,

            EwmError::InvalidEventDate { .. }
            | EwmError::InvalidDateRange
            | EwmError::InvalidStateAction(_)
            | EwmError::InvalidRequestStatus(_)
            | EwmError::InvalidEventState(_)
            | EwmError::InvalidDateTime(_)
            | EwmError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            EwmError::Database(_)
            | EwmError::Migration(_)
            | EwmError::Config(_)
            | EwmError::Http(_)
            | EwmError::Serialization(_)
            | EwmError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EwmError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal error while handling request");
        }
        let body = Json(ErrorResponse {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors_map_to_404() {
        assert_eq!(
            EwmError::EventNotFound { event_id: 7 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EwmError::UserNotFound { user_id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EwmError::RequestNotFound { request_id: 3 }.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_errors_map_to_409() {
        assert_eq!(
            EwmError::ParticipantLimitReached.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EwmError::PublishedEventImmutable.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EwmError::DuplicateCategoryName("concerts".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(EwmError::EventNotPublished.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_bad_request_errors_map_to_400() {
        assert_eq!(
            EwmError::InvalidEventDate { min_hours_ahead: 2 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EwmError::InvalidStateAction("PUBLISH".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EwmError::InvalidDateTime("2024-13-01".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_message_is_plain_text() {
        let err = EwmError::NoFreeSlots;
        assert_eq!(err.to_string(), "There is no empty place left in the event");
    }
}
