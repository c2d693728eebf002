//! Event service
//!
//! The workflow engine of the platform: event lifecycle transitions, the
//! capacity-gated bulk review of participation requests, and the admin and
//! public searches. Counter invariant: for events with a non-zero limit,
//! `confirmed_requests` never exceeds `participant_limit`.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::database::DatabaseService;
use crate::models::category::CategoryDto;
use crate::models::event::{
    AdminSearch, AdminStateAction, Event, EventFullDto, EventShortDto, EventSort, EventState,
    NewEventDto, PublicSearch, UpdateEventAdminRequest, UpdateEventUserRequest, UserStateAction,
};
use crate::models::location::LocationDto;
use crate::models::request::{
    EventRequestStatusUpdateRequest, EventRequestStatusUpdateResult, ParticipationRequest,
    ParticipationRequestDto, RequestStatus,
};
use crate::models::user::UserShortDto;
use crate::services::stats_client::StatsClient;
use crate::utils::datetime;
use crate::utils::errors::{EwmError, Result};
use crate::utils::helpers::{parse_comma_list, Pagination};

/// Minimum lead time for an event scheduled by its initiator
const USER_MIN_HOURS_AHEAD: i64 = 2;
/// Minimum lead time for an event published or rescheduled by an admin
const ADMIN_MIN_HOURS_AHEAD: i64 = 1;

/// Raw query parameters of `GET /admin/events`
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSearchParams {
    pub users: Option<String>,
    pub states: Option<String>,
    pub categories: Option<String>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

/// Raw query parameters of `GET /events`
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchParams {
    pub text: Option<String>,
    pub categories: Option<String>,
    pub paid: Option<bool>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
    #[serde(default)]
    pub only_available: bool,
    pub sort: Option<String>,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

impl Default for AdminSearchParams {
    fn default() -> Self {
        Self {
            users: None,
            states: None,
            categories: None,
            range_start: None,
            range_end: None,
            from: 0,
            size: default_page_size(),
        }
    }
}

impl Default for PublicSearchParams {
    fn default() -> Self {
        Self {
            text: None,
            categories: None,
            paid: None,
            range_start: None,
            range_end: None,
            only_available: false,
            sort: None,
            from: 0,
            size: default_page_size(),
        }
    }
}

#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
    stats: StatsClient,
}

impl EventService {
    pub fn new(db: DatabaseService, stats: StatsClient) -> Self {
        Self { db, stats }
    }

    /// Events created by one user, short form, paged
    pub async fn get_events_by_initiator(
        &self,
        user_id: i64,
        page: Pagination,
    ) -> Result<Vec<EventShortDto>> {
        self.require_user(user_id).await?;
        let events = self
            .db
            .events
            .find_by_initiator(user_id, page.limit(), page.offset())
            .await?;
        assemble_short_dtos(&self.db, &events).await
    }

    /// Create a new event; it starts PENDING with zero counters
    pub async fn post_event(&self, user_id: i64, dto: NewEventDto) -> Result<EventFullDto> {
        dto.validate()?;
        self.require_user(user_id).await?;
        let category = self
            .db
            .categories
            .find_by_id(dto.category)
            .await?
            .ok_or(EwmError::CategoryNotFound {
                category_id: dto.category,
            })?;

        let event_date = datetime::parse(&dto.event_date)?;
        let now = datetime::now();
        ensure_min_lead_time(event_date, now, USER_MIN_HOURS_AHEAD)?;

        let location = self
            .db
            .locations
            .find_or_create(dto.location.lat, dto.location.lon)
            .await?;

        let event = Event {
            id: 0,
            title: dto.title,
            annotation: dto.annotation,
            description: dto.description,
            category_id: category.id,
            initiator_id: user_id,
            location_id: location.id,
            event_date,
            created_on: now,
            published_on: None,
            paid: dto.paid,
            participant_limit: dto.participant_limit,
            request_moderation: dto.request_moderation,
            confirmed_requests: 0,
            views: 0,
            state: EventState::Pending,
        };
        let created = self.db.events.create(&event).await?;

        info!(event_id = created.id, user_id = user_id, "Event created");
        self.to_full_dto(&created).await
    }

    /// One event of one initiator, full form
    pub async fn get_event_by_initiator(&self, user_id: i64, event_id: i64) -> Result<EventFullDto> {
        self.require_user(user_id).await?;
        let event = self.require_event(event_id).await?;
        self.to_full_dto(&event).await
    }

    /// Initiator edit: allowed while the event is not PUBLISHED
    pub async fn update_event_by_initiator(
        &self,
        user_id: i64,
        event_id: i64,
        request: UpdateEventUserRequest,
    ) -> Result<EventFullDto> {
        self.require_user(user_id).await?;
        let mut event = self.require_event(event_id).await?;
        if event.initiator_id != user_id {
            return Err(EwmError::NotInitiator { user_id, event_id });
        }
        if event.state == EventState::Published {
            return Err(EwmError::PublishedEventImmutable);
        }
        request.validate()?;

        if let Some(raw_date) = &request.event_date {
            let event_date = datetime::parse(raw_date)?;
            ensure_min_lead_time(event_date, datetime::now(), USER_MIN_HOURS_AHEAD)?;
            event.event_date = event_date;
        }
        self.apply_common_fields(
            &mut event,
            request.annotation,
            request.category,
            request.description,
            request.location,
            request.paid,
            request.request_moderation,
            request.title,
        )
        .await?;
        if let Some(limit) = request.participant_limit {
            if limit != 0 && event.confirmed_requests > limit {
                return Err(EwmError::ParticipantLimitBelowConfirmed);
            }
            event.participant_limit = limit;
        }
        if let Some(action) = &request.state_action {
            event.state = match UserStateAction::from_str(action)? {
                UserStateAction::SendToReview => EventState::Pending,
                UserStateAction::CancelReview => EventState::Canceled,
            };
        }

        let updated = self.db.events.update(&event).await?;
        info!(event_id = event_id, user_id = user_id, "Event updated by initiator");
        self.to_full_dto(&updated).await
    }

    /// Admin edit: may publish or reject a pending event
    pub async fn update_event_by_admin(
        &self,
        event_id: i64,
        request: UpdateEventAdminRequest,
    ) -> Result<EventFullDto> {
        let mut event = self.require_event(event_id).await?;
        request.validate()?;

        if let Some(raw_date) = &request.event_date {
            let event_date = datetime::parse(raw_date)?;
            ensure_min_lead_time(event_date, datetime::now(), ADMIN_MIN_HOURS_AHEAD)?;
            event.event_date = event_date;
        }
        self.apply_common_fields(
            &mut event,
            request.annotation,
            request.category,
            request.description,
            request.location,
            request.paid,
            request.request_moderation,
            request.title,
        )
        .await?;
        if let Some(limit) = request.participant_limit {
            if limit != 0 && event.confirmed_requests > limit {
                return Err(EwmError::ParticipantLimitBelowConfirmed);
            }
            event.participant_limit = limit;
        }
        if let Some(action) = &request.state_action {
            let action = AdminStateAction::from_str(action)?;
            if event.state != EventState::Pending {
                return Err(EwmError::EventStateFinal);
            }
            match action {
                AdminStateAction::PublishEvent => {
                    let now = datetime::now();
                    ensure_min_lead_time(event.event_date, now, ADMIN_MIN_HOURS_AHEAD)?;
                    event.state = EventState::Published;
                    event.published_on = Some(now);
                }
                AdminStateAction::RejectEvent => {
                    event.state = EventState::Canceled;
                }
            }
        }

        let updated = self.db.events.update(&event).await?;
        info!(event_id = event_id, state = %updated.state, "Event updated by admin");
        self.to_full_dto(&updated).await
    }

    /// Requests targeting one event, visible to its initiator only
    pub async fn get_event_requests(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Vec<ParticipationRequestDto>> {
        self.require_user(user_id).await?;
        let event = self.require_event(event_id).await?;
        if event.initiator_id != user_id {
            return Err(EwmError::NotInitiator { user_id, event_id });
        }
        let requests = self.db.requests.find_by_event(event_id).await?;
        Ok(requests.iter().map(ParticipationRequestDto::from).collect())
    }

    /// Bulk confirm/reject of pending requests, capacity-gated.
    ///
    /// The event row is locked for the duration of the transaction, so two
    /// concurrent reviews of the same event serialize instead of jointly
    /// overrunning the participant limit.
    pub async fn update_request_statuses(
        &self,
        user_id: i64,
        event_id: i64,
        request: EventRequestStatusUpdateRequest,
    ) -> Result<EventRequestStatusUpdateResult> {
        self.require_user(user_id).await?;

        let mut tx = self.db.events.begin().await?;
        let mut event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })?;

        if event.initiator_id != user_id {
            return Err(EwmError::NotInitiator { user_id, event_id });
        }

        let status = RequestStatus::from_str(&request.status)?;
        let decision = match status {
            RequestStatus::Confirmed => ReviewDecision::Confirm,
            RequestStatus::Rejected => ReviewDecision::Reject,
            _ => return Err(EwmError::StatusNotConfirmedOrRejected),
        };

        if event.participant_limit != 0 && event.confirmed_requests >= event.participant_limit {
            return Err(EwmError::ParticipantLimitReached);
        }

        let mut requests = self
            .db
            .requests
            .find_by_ids_for_event(&mut tx, &request.request_ids, event_id)
            .await?;

        let outcome = review_requests(&mut event, &mut requests, decision)?;

        self.db
            .requests
            .update_statuses(&mut tx, &outcome.confirmed_ids, RequestStatus::Confirmed)
            .await?;
        self.db
            .requests
            .update_statuses(&mut tx, &outcome.rejected_ids, RequestStatus::Rejected)
            .await?;
        self.db
            .events
            .set_confirmed_requests(&mut tx, event.id, event.confirmed_requests)
            .await?;
        tx.commit().await?;

        info!(
            event_id = event_id,
            confirmed = outcome.confirmed_ids.len(),
            rejected = outcome.rejected_ids.len(),
            "Reviewed participation requests"
        );

        let (confirmed, rejected): (Vec<_>, Vec<_>) = requests
            .iter()
            .partition(|r| r.status == RequestStatus::Confirmed);
        Ok(EventRequestStatusUpdateResult {
            confirmed_requests: confirmed.iter().map(|r| ParticipationRequestDto::from(*r)).collect(),
            rejected_requests: rejected.iter().map(|r| ParticipationRequestDto::from(*r)).collect(),
        })
    }

    /// Admin search: conjunction of optional criteria, full DTOs
    pub async fn search_admin(&self, params: AdminSearchParams) -> Result<Vec<EventFullDto>> {
        let search = resolve_admin_search(&params)?;
        debug!(?search, "Admin event search");
        let events = self.db.events.search_admin(&search).await?;
        self.to_full_dtos(&events).await
    }

    /// Public search over published events; records a hit
    pub async fn search_public(
        &self,
        params: PublicSearchParams,
        uri: &str,
        ip: &str,
    ) -> Result<Vec<EventShortDto>> {
        let search = resolve_public_search(&params, datetime::now())?;
        debug!(?search, "Public event search");

        if let Err(e) = self.stats.record_hit(uri, ip, datetime::now()).await {
            warn!(error = %e, "Failed to record endpoint hit");
        }

        let events = self.db.events.search_public(&search).await?;
        assemble_short_dtos(&self.db, &events).await
    }

    /// Public read of a single published event; bumps the view counter and
    /// records a hit
    pub async fn get_published_event(&self, event_id: i64, uri: &str, ip: &str) -> Result<EventFullDto> {
        self.db
            .events
            .find_by_id_and_state(event_id, EventState::Published)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })?;

        if let Err(e) = self.stats.record_hit(uri, ip, datetime::now()).await {
            warn!(error = %e, "Failed to record endpoint hit");
        }

        let event = self
            .db
            .events
            .increment_views(event_id)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })?;
        self.to_full_dto(&event).await
    }

    async fn require_user(&self, user_id: i64) -> Result<()> {
        self.db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(EwmError::UserNotFound { user_id })?;
        Ok(())
    }

    async fn require_event(&self, event_id: i64) -> Result<Event> {
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EwmError::EventNotFound { event_id })
    }

    #[allow(clippy::too_many_arguments)]
    async fn apply_common_fields(
        &self,
        event: &mut Event,
        annotation: Option<String>,
        category: Option<i64>,
        description: Option<String>,
        location: Option<LocationDto>,
        paid: Option<bool>,
        request_moderation: Option<bool>,
        title: Option<String>,
    ) -> Result<()> {
        if let Some(annotation) = annotation {
            event.annotation = annotation;
        }
        if let Some(category_id) = category {
            let category = self
                .db
                .categories
                .find_by_id(category_id)
                .await?
                .ok_or(EwmError::CategoryNotFound { category_id })?;
            event.category_id = category.id;
        }
        if let Some(description) = description {
            event.description = description;
        }
        if let Some(location) = location {
            let location = self.db.locations.find_or_create(location.lat, location.lon).await?;
            event.location_id = location.id;
        }
        if let Some(paid) = paid {
            event.paid = paid;
        }
        if let Some(request_moderation) = request_moderation {
            event.request_moderation = request_moderation;
        }
        if let Some(title) = title {
            event.title = title;
        }
        Ok(())
    }

    async fn to_full_dto(&self, event: &Event) -> Result<EventFullDto> {
        let dtos = self.to_full_dtos(std::slice::from_ref(event)).await?;
        dtos.into_iter()
            .next()
            .ok_or(EwmError::EventNotFound { event_id: event.id })
    }

    async fn to_full_dtos(&self, events: &[Event]) -> Result<Vec<EventFullDto>> {
        let refs = fetch_references(&self.db, events).await?;
        events
            .iter()
            .map(|event| {
                let (category, initiator, location) = refs.resolve(event)?;
                Ok(EventFullDto {
                    annotation: event.annotation.clone(),
                    category,
                    confirmed_requests: event.confirmed_requests,
                    created_on: event.created_on,
                    description: event.description.clone(),
                    event_date: event.event_date,
                    id: event.id,
                    initiator,
                    location,
                    paid: event.paid,
                    participant_limit: event.participant_limit,
                    published_on: event.published_on,
                    request_moderation: event.request_moderation,
                    state: event.state,
                    title: event.title.clone(),
                    views: event.views,
                })
            })
            .collect()
    }
}

/// Review decision derived from the target status of a bulk update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewDecision {
    Confirm,
    Reject,
}

/// Outcome of a review pass: ids partitioned by their new status
#[derive(Debug, Default)]
struct ReviewOutcome {
    confirmed_ids: Vec<i64>,
    rejected_ids: Vec<i64>,
}

/// Apply a review decision to a batch of requests.
///
/// Every request must currently be PENDING. Rejection rejects the whole
/// batch. Confirmation confirms requests while a slot is free (a limit of
/// zero never runs out) and auto-rejects the remainder of the batch once the
/// limit is reached; the event's counter is advanced per confirmation.
fn review_requests(
    event: &mut Event,
    requests: &mut [ParticipationRequest],
    decision: ReviewDecision,
) -> Result<ReviewOutcome> {
    let mut outcome = ReviewOutcome::default();
    for request in requests.iter_mut() {
        if request.status != RequestStatus::Pending {
            return Err(EwmError::RequestNotPending);
        }
        match decision {
            ReviewDecision::Reject => {
                request.status = RequestStatus::Rejected;
                outcome.rejected_ids.push(request.id);
            }
            ReviewDecision::Confirm => {
                if event.has_free_slots() {
                    request.status = RequestStatus::Confirmed;
                    event.confirmed_requests += 1;
                    outcome.confirmed_ids.push(request.id);
                } else {
                    request.status = RequestStatus::Rejected;
                    outcome.rejected_ids.push(request.id);
                }
            }
        }
    }
    Ok(outcome)
}

/// The event date must be at least `min_hours` ahead of `now`
fn ensure_min_lead_time(
    event_date: NaiveDateTime,
    now: NaiveDateTime,
    min_hours: i64,
) -> Result<()> {
    if event_date < now + Duration::hours(min_hours) {
        return Err(EwmError::InvalidEventDate {
            min_hours_ahead: min_hours,
        });
    }
    Ok(())
}

fn resolve_admin_search(params: &AdminSearchParams) -> Result<AdminSearch> {
    let states = parse_comma_list::<String>(params.states.as_deref())?
        .iter()
        .map(|s| EventState::from_str(s))
        .collect::<Result<Vec<_>>>()?;
    Ok(AdminSearch {
        users: parse_comma_list(params.users.as_deref())?,
        states,
        categories: parse_comma_list(params.categories.as_deref())?,
        range_start: params.range_start.as_deref().map(datetime::parse).transpose()?,
        range_end: params.range_end.as_deref().map(datetime::parse).transpose()?,
        page: Pagination::new(params.from, params.size)?,
    })
}

fn resolve_public_search(params: &PublicSearchParams, now: NaiveDateTime) -> Result<PublicSearch> {
    let range_start = match &params.range_start {
        Some(raw) => datetime::parse(raw)?,
        None => now,
    };
    let range_end = params.range_end.as_deref().map(datetime::parse).transpose()?;
    if let Some(range_end) = range_end {
        if range_end <= range_start {
            return Err(EwmError::InvalidDateRange);
        }
    }
    let sort = match &params.sort {
        Some(raw) => EventSort::from_str(raw)?,
        None => EventSort::Views,
    };
    Ok(PublicSearch {
        text: params.text.clone().filter(|t| !t.trim().is_empty()),
        categories: parse_comma_list(params.categories.as_deref())?,
        paid: params.paid,
        range_start,
        range_end,
        only_available: params.only_available,
        sort,
        page: Pagination::new(params.from, params.size)?,
    })
}

/// Referenced rows of a batch of events, fetched once per table
struct EventReferences {
    categories: HashMap<i64, CategoryDto>,
    users: HashMap<i64, UserShortDto>,
    locations: HashMap<i64, LocationDto>,
}

impl EventReferences {
    fn resolve(&self, event: &Event) -> Result<(CategoryDto, UserShortDto, LocationDto)> {
        let category = self
            .categories
            .get(&event.category_id)
            .cloned()
            .ok_or(EwmError::CategoryNotFound {
                category_id: event.category_id,
            })?;
        let initiator = self
            .users
            .get(&event.initiator_id)
            .cloned()
            .ok_or(EwmError::UserNotFound {
                user_id: event.initiator_id,
            })?;
        let location = self
            .locations
            .get(&event.location_id)
            .copied()
            .unwrap_or(LocationDto { lat: 0.0, lon: 0.0 });
        Ok((category, initiator, location))
    }
}

async fn fetch_references(db: &DatabaseService, events: &[Event]) -> Result<EventReferences> {
    let mut category_ids: Vec<i64> = events.iter().map(|e| e.category_id).collect();
    let mut user_ids: Vec<i64> = events.iter().map(|e| e.initiator_id).collect();
    let mut location_ids: Vec<i64> = events.iter().map(|e| e.location_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();
    user_ids.sort_unstable();
    user_ids.dedup();
    location_ids.sort_unstable();
    location_ids.dedup();

    let categories = db
        .categories
        .find_by_ids(&category_ids)
        .await?
        .iter()
        .map(|c| (c.id, CategoryDto::from(c)))
        .collect();
    let users = db
        .users
        .find_by_ids(&user_ids)
        .await?
        .iter()
        .map(|u| (u.id, UserShortDto::from(u)))
        .collect();
    let locations = db
        .locations
        .find_by_ids(&location_ids)
        .await?
        .iter()
        .map(|l| (l.id, LocationDto::from(l)))
        .collect();

    Ok(EventReferences {
        categories,
        users,
        locations,
    })
}

/// Map events to short DTOs, fetching referenced rows in batches
pub(crate) async fn assemble_short_dtos(
    db: &DatabaseService,
    events: &[Event],
) -> Result<Vec<EventShortDto>> {
    let refs = fetch_references(db, events).await?;
    events
        .iter()
        .map(|event| {
            let (category, initiator, _) = refs.resolve(event)?;
            Ok(EventShortDto {
                annotation: event.annotation.clone(),
                category,
                confirmed_requests: event.confirmed_requests,
                event_date: event.event_date,
                id: event.id,
                initiator,
                paid: event.paid,
                title: event.title.clone(),
                views: event.views,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn event(limit: i32, confirmed: i32) -> Event {
        Event {
            id: 10,
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
            request_moderation: true,
            confirmed_requests: confirmed,
            views: 0,
            state: EventState::Published,
        }
    }

    fn pending_requests(n: usize) -> Vec<ParticipationRequest> {
        (0..n)
            .map(|i| ParticipationRequest {
                id: i as i64 + 1,
                event_id: 10,
                requester_id: i as i64 + 100,
                status: RequestStatus::Pending,
                created: datetime::parse("2035-03-01 09:00:00").unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_confirm_batch_splits_at_capacity() {
        // 1 slot left, 2 pending requests: first confirmed, second rejected
        let mut event = event(1, 0);
        let mut requests = pending_requests(2);
        let outcome =
            review_requests(&mut event, &mut requests, ReviewDecision::Confirm).unwrap();

        assert_eq!(outcome.confirmed_ids, vec![1]);
        assert_eq!(outcome.rejected_ids, vec![2]);
        assert_eq!(event.confirmed_requests, 1);
        assert_eq!(requests[0].status, RequestStatus::Confirmed);
        assert_eq!(requests[1].status, RequestStatus::Rejected);
    }

    #[test]
    fn test_confirm_batch_with_k_slots_yields_k_confirmed() {
        let mut event = event(5, 2);
        let mut requests = pending_requests(7);
        let outcome =
            review_requests(&mut event, &mut requests, ReviewDecision::Confirm).unwrap();

        assert_eq!(outcome.confirmed_ids.len(), 3);
        assert_eq!(outcome.rejected_ids.len(), 4);
        assert_eq!(event.confirmed_requests, 5);
        assert!(requests.iter().all(|r| r.status != RequestStatus::Pending));
    }

    #[test]
    fn test_confirm_unlimited_event_confirms_everything() {
        let mut event = event(0, 0);
        let mut requests = pending_requests(40);
        let outcome =
            review_requests(&mut event, &mut requests, ReviewDecision::Confirm).unwrap();

        assert_eq!(outcome.confirmed_ids.len(), 40);
        assert!(outcome.rejected_ids.is_empty());
        assert_eq!(event.confirmed_requests, 40);
    }

    #[test]
    fn test_counter_never_exceeds_limit() {
        for (limit, confirmed, batch) in [(1, 0, 5), (3, 1, 10), (2, 2, 4)] {
            let mut event = event(limit, confirmed);
            // a full event fails the precondition upstream; review still must
            // not overrun
            let mut requests = pending_requests(batch);
            review_requests(&mut event, &mut requests, ReviewDecision::Confirm).unwrap();
            assert!(event.confirmed_requests <= event.participant_limit);
        }
    }

    #[test]
    fn test_reject_batch_rejects_all_pending() {
        let mut event = event(5, 0);
        let mut requests = pending_requests(3);
        let outcome = review_requests(&mut event, &mut requests, ReviewDecision::Reject).unwrap();

        assert!(outcome.confirmed_ids.is_empty());
        assert_eq!(outcome.rejected_ids, vec![1, 2, 3]);
        assert_eq!(event.confirmed_requests, 0);
    }

    #[test]
    fn test_non_pending_request_fails_the_whole_batch() {
        let mut event = event(5, 0);
        let mut requests = pending_requests(3);
        requests[1].status = RequestStatus::Canceled;

        let result = review_requests(&mut event, &mut requests, ReviewDecision::Confirm);
        assert_matches!(result, Err(EwmError::RequestNotPending));

        let result = review_requests(&mut event, &mut requests, ReviewDecision::Reject);
        assert_matches!(result, Err(EwmError::RequestNotPending));
    }

    #[test]
    fn test_lead_time_rule() {
        let now = datetime::parse("2035-01-01 12:00:00").unwrap();
        let in_90_minutes = datetime::parse("2035-01-01 13:30:00").unwrap();
        let in_3_hours = datetime::parse("2035-01-01 15:00:00").unwrap();

        assert!(ensure_min_lead_time(in_3_hours, now, 2).is_ok());
        assert_matches!(
            ensure_min_lead_time(in_90_minutes, now, 2),
            Err(EwmError::InvalidEventDate { min_hours_ahead: 2 })
        );
        // the admin rule is looser
        assert!(ensure_min_lead_time(in_90_minutes, now, 1).is_ok());
    }

    #[test]
    fn test_lead_time_exact_boundary_is_allowed() {
        let now = datetime::parse("2035-01-01 12:00:00").unwrap();
        let in_2_hours = datetime::parse("2035-01-01 14:00:00").unwrap();
        assert!(ensure_min_lead_time(in_2_hours, now, 2).is_ok());
    }

    #[test]
    fn test_resolve_public_search_defaults() {
        let now = datetime::parse("2035-01-01 12:00:00").unwrap();
        let search = resolve_public_search(&PublicSearchParams::default(), now).unwrap();

        assert_eq!(search.range_start, now);
        assert_eq!(search.range_end, None);
        assert_eq!(search.sort, EventSort::Views);
        assert!(!search.only_available);
        assert_eq!(search.page.limit(), 10);
        assert_eq!(search.page.offset(), 0);
    }

    #[test]
    fn test_resolve_public_search_rejects_inverted_range() {
        let now = datetime::parse("2035-01-01 12:00:00").unwrap();
        let params = PublicSearchParams {
            range_start: Some("2035-06-01 00:00:00".to_string()),
            range_end: Some("2035-05-01 00:00:00".to_string()),
            ..Default::default()
        };
        assert_matches!(
            resolve_public_search(&params, now),
            Err(EwmError::InvalidDateRange)
        );
    }

    #[test]
    fn test_resolve_public_search_rejects_equal_bounds() {
        let now = datetime::parse("2035-01-01 12:00:00").unwrap();
        let params = PublicSearchParams {
            range_start: Some("2035-06-01 00:00:00".to_string()),
            range_end: Some("2035-06-01 00:00:00".to_string()),
            ..Default::default()
        };
        assert_matches!(
            resolve_public_search(&params, now),
            Err(EwmError::InvalidDateRange)
        );
    }

    #[test]
    fn test_resolve_admin_search_parses_states() {
        let params = AdminSearchParams {
            states: Some("PENDING,PUBLISHED".to_string()),
            users: Some("1,2".to_string()),
            ..Default::default()
        };
        let search = resolve_admin_search(&params).unwrap();
        assert_eq!(search.states, vec![EventState::Pending, EventState::Published]);
        assert_eq!(search.users, vec![1, 2]);
        assert_eq!(search.range_start, None);
    }

    #[test]
    fn test_resolve_admin_search_rejects_unknown_state() {
        let params = AdminSearchParams {
            states: Some("PENDING,DRAFT".to_string()),
            ..Default::default()
        };
        assert_matches!(
            resolve_admin_search(&params),
            Err(EwmError::InvalidEventState(_))
        );
    }

    #[test]
    fn test_resolve_public_search_rejects_bad_sort() {
        let params = PublicSearchParams {
            sort: Some("POPULARITY".to_string()),
            ..Default::default()
        };
        let now = datetime::parse("2035-01-01 12:00:00").unwrap();
        assert_matches!(resolve_public_search(&params, now), Err(EwmError::InvalidInput(_)));
    }
}
