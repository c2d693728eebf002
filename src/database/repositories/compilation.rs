//! Compilation repository implementation
//!
//! The compilation/event many-to-many link lives in `compilation_events`;
//! replacing a compilation's event list rewrites its link rows.

use sqlx::PgPool;

use crate::models::compilation::Compilation;
use crate::utils::errors::EwmError;

#[derive(Debug, Clone)]
pub struct CompilationRepository {
    pool: PgPool,
}

impl CompilationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new compilation and link the given events
    pub async fn create(
        &self,
        title: &str,
        pinned: bool,
        event_ids: &[i64],
    ) -> Result<Compilation, EwmError> {
        let mut tx = self.pool.begin().await?;

        let compilation = sqlx::query_as::<_, Compilation>(
            "INSERT INTO compilations (title, pinned) VALUES ($1, $2) RETURNING id, title, pinned",
        )
        .bind(title)
        .bind(pinned)
        .fetch_one(&mut *tx)
        .await?;

        for event_id in event_ids {
            sqlx::query(
                "INSERT INTO compilation_events (compilation_id, event_id) VALUES ($1, $2)",
            )
            .bind(compilation.id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(compilation)
    }

    /// Find compilation by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Compilation>, EwmError> {
        let compilation = sqlx::query_as::<_, Compilation>(
            "SELECT id, title, pinned FROM compilations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(compilation)
    }

    /// List compilations, optionally filtered by the pinned flag, page-aligned
    pub async fn list(
        &self,
        pinned: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Compilation>, EwmError> {
        let compilations = match pinned {
            Some(pinned) => {
                sqlx::query_as::<_, Compilation>(
                    "SELECT id, title, pinned FROM compilations WHERE pinned = $1 \
                     ORDER BY id LIMIT $2 OFFSET $3",
                )
                .bind(pinned)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Compilation>(
                    "SELECT id, title, pinned FROM compilations ORDER BY id LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(compilations)
    }

    /// IDs of the events linked to a compilation
    pub async fn event_ids(&self, compilation_id: i64) -> Result<Vec<i64>, EwmError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT event_id FROM compilation_events WHERE compilation_id = $1 ORDER BY event_id",
        )
        .bind(compilation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Update title/pinned and, when a new event list is given, relink events
    pub async fn update(
        &self,
        compilation: &Compilation,
        event_ids: Option<&[i64]>,
    ) -> Result<Compilation, EwmError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Compilation>(
            "UPDATE compilations SET title = $2, pinned = $3 WHERE id = $1 \
             RETURNING id, title, pinned",
        )
        .bind(compilation.id)
        .bind(&compilation.title)
        .bind(compilation.pinned)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(event_ids) = event_ids {
            sqlx::query("DELETE FROM compilation_events WHERE compilation_id = $1")
                .bind(compilation.id)
                .execute(&mut *tx)
                .await?;
            for event_id in event_ids {
                sqlx::query(
                    "INSERT INTO compilation_events (compilation_id, event_id) VALUES ($1, $2)",
                )
                .bind(compilation.id)
                .bind(event_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete compilation and its event links
    pub async fn delete(&self, id: i64) -> Result<(), EwmError> {
        sqlx::query("DELETE FROM compilations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
