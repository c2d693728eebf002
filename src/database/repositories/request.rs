//! Participation request repository implementation

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::request::{ParticipationRequest, RequestStatus};
use crate::utils::errors::EwmError;

const REQUEST_COLUMNS: &str = "id, event_id, requester_id, status, created";

#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new request inside a transaction
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: i64,
        requester_id: i64,
        status: RequestStatus,
        created: NaiveDateTime,
    ) -> Result<ParticipationRequest, EwmError> {
        let request = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "INSERT INTO requests (event_id, requester_id, status, created) \
             VALUES ($1, $2, $3, $4) RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(event_id)
        .bind(requester_id)
        .bind(status)
        .bind(created)
        .fetch_one(&mut **tx)
        .await?;

        Ok(request)
    }

    /// Find request by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ParticipationRequest>, EwmError> {
        let request = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Lock and fetch a request row inside a transaction
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<ParticipationRequest>, EwmError> {
        let request = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(request)
    }

    /// All requests submitted by one user
    pub async fn find_by_requester(
        &self,
        requester_id: i64,
    ) -> Result<Vec<ParticipationRequest>, EwmError> {
        let requests = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE requester_id = $1 ORDER BY id"
        ))
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// All requests targeting one event
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<ParticipationRequest>, EwmError> {
        let requests = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE event_id = $1 ORDER BY id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Lock and fetch the named requests of one event, inside a transaction.
    /// Requests of other events are silently excluded from the result.
    pub async fn find_by_ids_for_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ids: &[i64],
        event_id: i64,
    ) -> Result<Vec<ParticipationRequest>, EwmError> {
        let requests = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests \
             WHERE id = ANY($1) AND event_id = $2 ORDER BY id FOR UPDATE"
        ))
        .bind(ids)
        .bind(event_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(requests)
    }

    /// Whether the user already has a non-canceled request for the event
    pub async fn exists_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requester_id: i64,
        event_id: i64,
    ) -> Result<bool, EwmError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM requests \
             WHERE requester_id = $1 AND event_id = $2 AND status <> $3",
        )
        .bind(requester_id)
        .bind(event_id)
        .bind(RequestStatus::Canceled)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count > 0)
    }

    /// Set the status of a set of requests inside a transaction
    pub async fn update_statuses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ids: &[i64],
        status: RequestStatus,
    ) -> Result<(), EwmError> {
        if ids.is_empty() {
            return Ok(());
        }
        sqlx::query("UPDATE requests SET status = $2 WHERE id = ANY($1)")
            .bind(ids)
            .bind(status)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Set the status of a single request inside a transaction
    pub async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        status: RequestStatus,
    ) -> Result<ParticipationRequest, EwmError> {
        let request = sqlx::query_as::<_, ParticipationRequest>(&format!(
            "UPDATE requests SET status = $2 WHERE id = $1 RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await?;

        Ok(request)
    }

    /// Begin a transaction on the underlying pool
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, EwmError> {
        Ok(self.pool.begin().await?)
    }
}
