//! Event model
//!
//! The event lifecycle is a three-state machine: every event is created
//! PENDING, the initiator may send it back to review or cancel it before
//! publication, and an administrator publishes or rejects it. Once PUBLISHED
//! an event is immutable except for its counters.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::CategoryDto;
use crate::models::location::LocationDto;
use crate::models::user::UserShortDto;
use crate::utils::datetime::{date_format, opt_date_format};
use crate::utils::errors::{EwmError, Result};
use crate::utils::helpers::Pagination;

/// Lifecycle state of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum EventState {
    Pending,
    Published,
    Canceled,
}

impl EventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Pending => "PENDING",
            EventState::Published => "PUBLISHED",
            EventState::Canceled => "CANCELED",
        }
    }
}

impl FromStr for EventState {
    type Err = EwmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(EventState::Pending),
            "PUBLISHED" => Ok(EventState::Published),
            "CANCELED" => Ok(EventState::Canceled),
            _ => Err(EwmError::InvalidEventState(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State action an initiator may request on their own pending event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStateAction {
    SendToReview,
    CancelReview,
}

impl FromStr for UserStateAction {
    type Err = EwmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SEND_TO_REVIEW" => Ok(UserStateAction::SendToReview),
            "CANCEL_REVIEW" => Ok(UserStateAction::CancelReview),
            _ => Err(EwmError::InvalidStateAction(s.to_string())),
        }
    }
}

/// State action an administrator may apply to a pending event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStateAction {
    PublishEvent,
    RejectEvent,
}

impl FromStr for AdminStateAction {
    type Err = EwmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PUBLISH_EVENT" => Ok(AdminStateAction::PublishEvent),
            "REJECT_EVENT" => Ok(AdminStateAction::RejectEvent),
            _ => Err(EwmError::InvalidStateAction(s.to_string())),
        }
    }
}

/// Sort key for the public event search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSort {
    EventDate,
    Views,
}

impl FromStr for EventSort {
    type Err = EwmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EVENT_DATE" => Ok(EventSort::EventDate),
            "VIEWS" => Ok(EventSort::Views),
            _ => Err(EwmError::InvalidInput(format!("Unknown sort key: {s}"))),
        }
    }
}

/// Event database entity. References category, initiator and location by id;
/// the referenced rows are fetched explicitly when a DTO is assembled.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub annotation: String,
    pub description: String,
    pub category_id: i64,
    pub initiator_id: i64,
    pub location_id: i64,
    pub event_date: NaiveDateTime,
    pub created_on: NaiveDateTime,
    pub published_on: Option<NaiveDateTime>,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub confirmed_requests: i32,
    pub views: i64,
    pub state: EventState,
}

impl Event {
    /// Whether the event still has room for another confirmed participant.
    /// A limit of zero means unlimited.
    pub fn has_free_slots(&self) -> bool {
        self.participant_limit == 0 || self.confirmed_requests < self.participant_limit
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventDto {
    pub annotation: String,
    pub category: i64,
    pub description: String,
    pub event_date: String,
    pub location: LocationDto,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub participant_limit: i32,
    #[serde(default = "default_request_moderation")]
    pub request_moderation: bool,
    pub title: String,
}

fn default_request_moderation() -> bool {
    true
}

impl NewEventDto {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_annotation(&self.annotation)?;
        validate_description(&self.description)?;
        if self.participant_limit < 0 {
            return Err(EwmError::InvalidInput(
                "Participant limit must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventUserRequest {
    pub annotation: Option<String>,
    pub category: Option<i64>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<LocationDto>,
    pub paid: Option<bool>,
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    pub state_action: Option<String>,
    pub title: Option<String>,
}

impl UpdateEventUserRequest {
    pub fn validate(&self) -> Result<()> {
        validate_update_fields(
            self.title.as_deref(),
            self.annotation.as_deref(),
            self.description.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventAdminRequest {
    pub annotation: Option<String>,
    pub category: Option<i64>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<LocationDto>,
    pub paid: Option<bool>,
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    pub state_action: Option<String>,
    pub title: Option<String>,
}

impl UpdateEventAdminRequest {
    pub fn validate(&self) -> Result<()> {
        validate_update_fields(
            self.title.as_deref(),
            self.annotation.as_deref(),
            self.description.as_deref(),
        )
    }
}

fn validate_update_fields(
    title: Option<&str>,
    annotation: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(annotation) = annotation {
        validate_annotation(annotation)?;
    }
    if let Some(description) = description {
        validate_description(description)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    let len = title.trim().chars().count();
    if !(3..=120).contains(&len) {
        return Err(EwmError::InvalidInput(
            "Title must be between 3 and 120 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_annotation(annotation: &str) -> Result<()> {
    let len = annotation.trim().chars().count();
    if !(20..=2000).contains(&len) {
        return Err(EwmError::InvalidInput(
            "Annotation must be between 20 and 2000 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    let len = description.trim().chars().count();
    if !(20..=7000).contains(&len) {
        return Err(EwmError::InvalidInput(
            "Description must be between 20 and 7000 characters".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFullDto {
    pub annotation: String,
    pub category: CategoryDto,
    pub confirmed_requests: i32,
    #[serde(with = "date_format")]
    pub created_on: NaiveDateTime,
    pub description: String,
    #[serde(with = "date_format")]
    pub event_date: NaiveDateTime,
    pub id: i64,
    pub initiator: UserShortDto,
    pub location: LocationDto,
    pub paid: bool,
    pub participant_limit: i32,
    #[serde(with = "opt_date_format")]
    pub published_on: Option<NaiveDateTime>,
    pub request_moderation: bool,
    pub state: EventState,
    pub title: String,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventShortDto {
    pub annotation: String,
    pub category: CategoryDto,
    pub confirmed_requests: i32,
    #[serde(with = "date_format")]
    pub event_date: NaiveDateTime,
    pub id: i64,
    pub initiator: UserShortDto,
    pub paid: bool,
    pub title: String,
    pub views: i64,
}

/// Resolved criteria for the admin event search. Absent criteria are omitted
/// from the conjunction, not treated as always-true predicates.
#[derive(Debug, Clone)]
pub struct AdminSearch {
    pub users: Vec<i64>,
    pub states: Vec<EventState>,
    pub categories: Vec<i64>,
    pub range_start: Option<NaiveDateTime>,
    pub range_end: Option<NaiveDateTime>,
    pub page: Pagination,
}

/// Resolved criteria for the public event search
#[derive(Debug, Clone)]
pub struct PublicSearch {
    pub text: Option<String>,
    pub categories: Vec<i64>,
    pub paid: Option<bool>,
    pub range_start: NaiveDateTime,
    pub range_end: Option<NaiveDateTime>,
    pub only_available: bool,
    pub sort: EventSort,
    pub page: Pagination,
}
