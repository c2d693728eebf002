//! Comment repository implementation

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::models::comment::Comment;
use crate::utils::errors::EwmError;

const COMMENT_COLUMNS: &str = "id, text, event_id, author_id, created";

#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new comment
    pub async fn create(
        &self,
        text: &str,
        event_id: i64,
        author_id: i64,
        created: NaiveDateTime,
    ) -> Result<Comment, EwmError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (text, event_id, author_id, created) \
             VALUES ($1, $2, $3, $4) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(text)
        .bind(event_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Find comment by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, EwmError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// All comments on one event, oldest first
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<Comment>, EwmError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE event_id = $1 ORDER BY created, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Update a comment's text
    pub async fn update_text(&self, id: i64, text: &str) -> Result<Comment, EwmError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET text = $2 WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Delete comment
    pub async fn delete(&self, id: i64) -> Result<(), EwmError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
