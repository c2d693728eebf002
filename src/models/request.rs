//! Participation request model
//!
//! A request lifecycle: created PENDING (or CONFIRMED immediately when the
//! event is unmoderated or unlimited), then moved by the initiator's bulk
//! review to CONFIRMED/REJECTED, or by its owner to CANCELED. Requests are
//! never deleted.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::datetime::date_format;
use crate::utils::errors::{EwmError, Result};

/// Status of a participation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Confirmed => "CONFIRMED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Canceled => "CANCELED",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = EwmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "CONFIRMED" => Ok(RequestStatus::Confirmed),
            "REJECTED" => Ok(RequestStatus::Rejected),
            "CANCELED" => Ok(RequestStatus::Canceled),
            _ => Err(EwmError::InvalidRequestStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ParticipationRequest {
    pub id: i64,
    pub event_id: i64,
    pub requester_id: i64,
    pub status: RequestStatus,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRequestDto {
    pub id: i64,
    pub event: i64,
    pub requester: i64,
    pub status: RequestStatus,
    #[serde(with = "date_format")]
    pub created: NaiveDateTime,
}

impl From<&ParticipationRequest> for ParticipationRequestDto {
    fn from(request: &ParticipationRequest) -> Self {
        Self {
            id: request.id,
            event: request.event_id,
            requester: request.requester_id,
            status: request.status,
            created: request.created,
        }
    }
}

/// Bulk review payload: the named requests move to the given status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestStatusUpdateRequest {
    pub request_ids: Vec<i64>,
    pub status: String,
}

/// Bulk review outcome, partitioned into newly confirmed and newly rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestStatusUpdateResult {
    pub confirmed_requests: Vec<ParticipationRequestDto>,
    pub rejected_requests: Vec<ParticipationRequestDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_request_status_round_trips_through_strings() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Confirmed,
            RequestStatus::Rejected,
            RequestStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_a_bad_request() {
        assert_matches!(
            "APPROVED".parse::<RequestStatus>(),
            Err(EwmError::InvalidRequestStatus(_))
        );
    }

    #[test]
    fn test_request_dto_serializes_with_api_timestamp() {
        let request = ParticipationRequest {
            id: 4,
            event_id: 2,
            requester_id: 9,
            status: RequestStatus::Pending,
            created: crate::utils::datetime::parse("2035-03-02 10:00:00").unwrap(),
        };
        let dto = ParticipationRequestDto::from(&request);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["created"], "2035-03-02 10:00:00");
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["event"], 2);
    }
}
