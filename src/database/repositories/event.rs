//! Event repository implementation
//!
//! Search queries build a conjunction of independent predicates with
//! `QueryBuilder`; absent criteria are omitted from the conjunction entirely.

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::models::event::{AdminSearch, Event, EventSort, EventState, PublicSearch};
use crate::utils::errors::EwmError;

const EVENT_COLUMNS: &str = "id, title, annotation, description, category_id, initiator_id, \
     location_id, event_date, created_on, published_on, paid, participant_limit, \
     request_moderation, confirmed_requests, views, state";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new event; the `id` field of the argument is ignored
    pub async fn create(&self, event: &Event) -> Result<Event, EwmError> {
        let created = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (title, annotation, description, category_id, initiator_id, \
             location_id, event_date, created_on, published_on, paid, participant_limit, \
             request_moderation, confirmed_requests, views, state) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.title)
        .bind(&event.annotation)
        .bind(&event.description)
        .bind(event.category_id)
        .bind(event.initiator_id)
        .bind(event.location_id)
        .bind(event.event_date)
        .bind(event.created_on)
        .bind(event.published_on)
        .bind(event.paid)
        .bind(event.participant_limit)
        .bind(event.request_moderation)
        .bind(event.confirmed_requests)
        .bind(event.views)
        .bind(event.state)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EwmError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID restricted to one lifecycle state
    pub async fn find_by_id_and_state(
        &self,
        id: i64,
        state: EventState,
    ) -> Result<Option<Event>, EwmError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 AND state = $2"
        ))
        .bind(id)
        .bind(state)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Lock and fetch an event row inside a transaction. Concurrent reviews
    /// of the same event serialize on this row lock.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<Event>, EwmError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(event)
    }

    /// Events created by one initiator, page-aligned
    pub async fn find_by_initiator(
        &self,
        initiator_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, EwmError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE initiator_id = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(initiator_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Fetch events for a set of IDs
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Event>, EwmError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Whether any event references the category
    pub async fn exists_by_category(&self, category_id: i64) -> Result<bool, EwmError> {
        let count: i64 =
            sqlx::query_scalar("SELECT count(*) FROM events WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Persist all mutable fields of an event
    pub async fn update(&self, event: &Event) -> Result<Event, EwmError> {
        let updated = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET title = $2, annotation = $3, description = $4, category_id = $5, \
             location_id = $6, event_date = $7, published_on = $8, paid = $9, \
             participant_limit = $10, request_moderation = $11, confirmed_requests = $12, \
             views = $13, state = $14 \
             WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.annotation)
        .bind(&event.description)
        .bind(event.category_id)
        .bind(event.location_id)
        .bind(event.event_date)
        .bind(event.published_on)
        .bind(event.paid)
        .bind(event.participant_limit)
        .bind(event.request_moderation)
        .bind(event.confirmed_requests)
        .bind(event.views)
        .bind(event.state)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Set the confirmed-request counter inside a transaction
    pub async fn set_confirmed_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: i64,
        confirmed_requests: i32,
    ) -> Result<(), EwmError> {
        sqlx::query("UPDATE events SET confirmed_requests = $2 WHERE id = $1")
            .bind(event_id)
            .bind(confirmed_requests)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Increment the view counter and return the updated row
    pub async fn increment_views(&self, id: i64) -> Result<Option<Event>, EwmError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET views = views + 1 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Admin search: conjunction of the supplied criteria, no defaults
    pub async fn search_admin(&self, search: &AdminSearch) -> Result<Vec<Event>, EwmError> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {EVENT_COLUMNS} FROM events WHERE TRUE"));

        if !search.users.is_empty() {
            query.push(" AND initiator_id = ANY(");
            query.push_bind(search.users.clone());
            query.push(")");
        }
        if !search.states.is_empty() {
            let states: Vec<String> = search.states.iter().map(|s| s.as_str().to_string()).collect();
            query.push(" AND state = ANY(");
            query.push_bind(states);
            query.push(")");
        }
        if !search.categories.is_empty() {
            query.push(" AND category_id = ANY(");
            query.push_bind(search.categories.clone());
            query.push(")");
        }
        if let Some(range_start) = search.range_start {
            query.push(" AND event_date > ");
            query.push_bind(range_start);
        }
        if let Some(range_end) = search.range_end {
            query.push(" AND event_date < ");
            query.push_bind(range_end);
        }

        query.push(" ORDER BY id LIMIT ");
        query.push_bind(search.page.limit());
        query.push(" OFFSET ");
        query.push_bind(search.page.offset());

        let events = query.build_query_as::<Event>().fetch_all(&self.pool).await?;
        Ok(events)
    }

    /// Public search over published events
    pub async fn search_public(&self, search: &PublicSearch) -> Result<Vec<Event>, EwmError> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {EVENT_COLUMNS} FROM events WHERE state = "));
        query.push_bind(EventState::Published);

        query.push(" AND event_date > ");
        query.push_bind(search.range_start);

        if let Some(text) = &search.text {
            query.push(" AND annotation ILIKE ");
            query.push_bind(format!("%{text}%"));
        }
        if !search.categories.is_empty() {
            query.push(" AND category_id = ANY(");
            query.push_bind(search.categories.clone());
            query.push(")");
        }
        if let Some(paid) = search.paid {
            query.push(" AND paid = ");
            query.push_bind(paid);
        }
        if let Some(range_end) = search.range_end {
            query.push(" AND event_date < ");
            query.push_bind(range_end);
        }
        if search.only_available {
            query.push(" AND (participant_limit = 0 OR confirmed_requests < participant_limit)");
        }

        match search.sort {
            EventSort::EventDate => query.push(" ORDER BY event_date ASC"),
            EventSort::Views => query.push(" ORDER BY views ASC"),
        };
        query.push(" LIMIT ");
        query.push_bind(search.page.limit());
        query.push(" OFFSET ");
        query.push_bind(search.page.offset());

        let events = query.build_query_as::<Event>().fetch_all(&self.pool).await?;
        Ok(events)
    }

    /// Begin a transaction on the underlying pool
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, EwmError> {
        Ok(self.pool.begin().await?)
    }
}
