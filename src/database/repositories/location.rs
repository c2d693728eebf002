//! Location repository implementation
//!
//! Locations are deduplicated by exact (lat, lon): a new row is only inserted
//! when no existing row carries the same coordinates.

use sqlx::PgPool;

use crate::models::location::Location;
use crate::utils::errors::EwmError;

#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an existing location with the same coordinates or insert one
    pub async fn find_or_create(&self, lat: f64, lon: f64) -> Result<Location, EwmError> {
        let existing = sqlx::query_as::<_, Location>(
            "SELECT id, lat, lon FROM locations WHERE lat = $1 AND lon = $2 LIMIT 1",
        )
        .bind(lat)
        .bind(lon)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(location) = existing {
            return Ok(location);
        }

        let location = sqlx::query_as::<_, Location>(
            "INSERT INTO locations (lat, lon) VALUES ($1, $2) RETURNING id, lat, lon",
        )
        .bind(lat)
        .bind(lon)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    /// Find location by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Location>, EwmError> {
        let location =
            sqlx::query_as::<_, Location>("SELECT id, lat, lon FROM locations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(location)
    }

    /// Fetch locations for a set of IDs
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Location>, EwmError> {
        let locations =
            sqlx::query_as::<_, Location>("SELECT id, lat, lon FROM locations WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(locations)
    }
}
