//! User repository implementation

use sqlx::PgPool;

use crate::models::user::{NewUserRequest, User};
use crate::utils::errors::EwmError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: NewUserRequest) -> Result<User, EwmError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(request.name)
        .bind(request.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, EwmError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find user by exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>, EwmError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// List users, optionally restricted to a set of IDs, page-aligned
    pub async fn list(&self, ids: &[i64], limit: i64, offset: i64) -> Result<Vec<User>, EwmError> {
        let users = if ids.is_empty() {
            sqlx::query_as::<_, User>(
                "SELECT id, name, email FROM users ORDER BY id LIMIT $1 OFFSET $2",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, User>(
                "SELECT id, name, email FROM users WHERE id = ANY($1) ORDER BY id LIMIT $2 OFFSET $3",
            )
            .bind(ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(users)
    }

    /// Fetch users for a set of IDs, in no particular order
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, EwmError> {
        let users =
            sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    /// Delete user
    pub async fn delete(&self, id: i64) -> Result<(), EwmError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
