//! Participation request service
//!
//! Creation and cancellation of participation requests. Both paths lock the
//! event row first so the confirmed counter cannot be torn by a concurrent
//! review of the same event.

use tracing::info;

use crate::database::DatabaseService;
use crate::models::event::{Event, EventState};
use crate::models::request::{ParticipationRequestDto, RequestStatus};
use crate::utils::datetime;
use crate::utils::errors::{EwmError, Result};

#[derive(Debug, Clone)]
pub struct RequestService {
    db: DatabaseService,
}

impl RequestService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// All requests submitted by one user
    pub async fn get_requests_by_user(&self, user_id: i64) -> Result<Vec<ParticipationRequestDto>> {
        self.require_user(user_id).await?;
        let requests = self.db.requests.find_by_requester(user_id).await?;
        Ok(requests.iter().map(ParticipationRequestDto::from).collect())
    }

    /// Request to join an event.
    ///
    /// Fails with a conflict when an active request already exists, the
    /// requester initiated the event, the event is unpublished, or a non-zero
    /// limit is already reached. Unmoderated and unlimited events confirm
    /// immediately, advancing the event counter in the same transaction.
    pub async fn create_request(&self, user_id: i64, event_id: i64) -> Result<ParticipationRequestDto> {
        self.require_user(user_id).await?;

        let mut tx = self.db.requests.begin().await?;
        let event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })?;

        if self.db.requests.exists_active(&mut tx, user_id, event_id).await? {
            return Err(EwmError::DuplicateRequest);
        }
        if event.initiator_id == user_id {
            return Err(EwmError::SelfParticipation);
        }
        if event.state != EventState::Published {
            return Err(EwmError::EventNotPublished);
        }
        if event.participant_limit != 0 && event.confirmed_requests >= event.participant_limit {
            return Err(EwmError::NoFreeSlots);
        }

        let status = initial_request_status(&event);
        let request = self
            .db
            .requests
            .create(&mut tx, event_id, user_id, status, datetime::now())
            .await?;
        if status == RequestStatus::Confirmed {
            self.db
                .events
                .set_confirmed_requests(&mut tx, event.id, event.confirmed_requests + 1)
                .await?;
        }
        tx.commit().await?;

        info!(
            request_id = request.id,
            event_id = event_id,
            user_id = user_id,
            status = %request.status,
            "Participation request created"
        );
        Ok(ParticipationRequestDto::from(&request))
    }

    /// Cancel one of the user's own requests. Cancelling a confirmed request
    /// frees its slot by decrementing the event counter.
    pub async fn cancel_request(&self, user_id: i64, request_id: i64) -> Result<ParticipationRequestDto> {
        self.require_user(user_id).await?;

        let request = self
            .db
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(EwmError::RequestNotFound { request_id })?;
        if request.requester_id != user_id {
            return Err(EwmError::RequestNotFound { request_id });
        }

        // Lock the event before re-reading the request, matching the lock
        // order of the review and creation flows.
        let mut tx = self.db.requests.begin().await?;
        let event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, request.event_id)
            .await?;
        let request = self
            .db
            .requests
            .find_by_id_for_update(&mut tx, request_id)
            .await?
            .ok_or(EwmError::RequestNotFound { request_id })?;

        let was_confirmed = request.status == RequestStatus::Confirmed;
        let canceled = self
            .db
            .requests
            .update_status(&mut tx, request_id, RequestStatus::Canceled)
            .await?;
        if was_confirmed {
            if let Some(event) = event {
                self.db
                    .events
                    .set_confirmed_requests(&mut tx, event.id, event.confirmed_requests - 1)
                    .await?;
            }
        }
        tx.commit().await?;

        info!(request_id = request_id, user_id = user_id, "Participation request canceled");
        Ok(ParticipationRequestDto::from(&canceled))
    }

    async fn require_user(&self, user_id: i64) -> Result<()> {
        self.db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(EwmError::UserNotFound { user_id })?;
        Ok(())
    }
}

/// Initial status of a freshly created request: confirmed immediately for
/// unlimited or unmoderated events, pending otherwise.
fn initial_request_status(event: &Event) -> RequestStatus {
    if event.participant_limit == 0 || !event.request_moderation {
        RequestStatus::Confirmed
    } else {
        RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(limit: i32, moderation: bool) -> Event {
        Event {
            id: 1,
            title: "Weekend lindy exchange".to_string(),
            annotation: "A full weekend of social dancing downtown".to_string(),
            description: "Two evenings of social dancing with live bands".to_string(),
            category_id: 1,
            initiator_id: 1,
            location_id: 1,
            event_date: datetime::parse("2035-06-01 18:30:00").unwrap(),
            created_on: datetime::parse("2035-01-01 12:00:00").unwrap(),
            published_on: None,
            paid: false,
            participant_limit: limit,
            request_moderation: moderation,
            confirmed_requests: 0,
            views: 0,
            state: EventState::Published,
        }
    }

    #[test]
    fn test_unmoderated_event_confirms_immediately() {
        assert_eq!(
            initial_request_status(&event(10, false)),
            RequestStatus::Confirmed
        );
    }

    #[test]
    fn test_unlimited_event_confirms_regardless_of_moderation() {
        assert_eq!(
            initial_request_status(&event(0, true)),
            RequestStatus::Confirmed
        );
        assert_eq!(
            initial_request_status(&event(0, false)),
            RequestStatus::Confirmed
        );
    }

    #[test]
    fn test_moderated_limited_event_starts_pending() {
        assert_eq!(
            initial_request_status(&event(10, true)),
            RequestStatus::Pending
        );
    }
}
