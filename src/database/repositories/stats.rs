//! Statistics repository implementation
//!
//! Backs the stats service: an append-only hit log plus the aggregation
//! queries behind `GET /stats`. Lives in the stats service's own database.

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::stats::{EndpointHit, ViewStats};
use crate::utils::errors::EwmError;

#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one hit row
    pub async fn save_hit(
        &self,
        app: &str,
        uri: &str,
        ip: &str,
        created: NaiveDateTime,
    ) -> Result<EndpointHit, EwmError> {
        let hit = sqlx::query_as::<_, EndpointHit>(
            "INSERT INTO endpoint_hits (app, uri, ip, created) VALUES ($1, $2, $3, $4) \
             RETURNING id, app, uri, ip, created",
        )
        .bind(app)
        .bind(uri)
        .bind(ip)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        Ok(hit)
    }

    /// Aggregated view counts per (app, uri) inside the time range, ordered
    /// by hit count descending. With `unique` the count is over distinct IPs;
    /// `uri_prefixes` restricts to URIs starting with any of the prefixes.
    pub async fn view_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uri_prefixes: &[String],
        unique: bool,
    ) -> Result<Vec<ViewStats>, EwmError> {
        let select = if unique {
            "SELECT app, uri, count(DISTINCT ip) AS hits FROM endpoint_hits WHERE created BETWEEN "
        } else {
            "SELECT app, uri, count(ip) AS hits FROM endpoint_hits WHERE created BETWEEN "
        };

        let mut query = QueryBuilder::<Postgres>::new(select);
        query.push_bind(start);
        query.push(" AND ");
        query.push_bind(end);

        if !uri_prefixes.is_empty() {
            query.push(" AND (");
            for (i, prefix) in uri_prefixes.iter().enumerate() {
                if i > 0 {
                    query.push(" OR ");
                }
                query.push("uri LIKE ");
                query.push_bind(format!("{prefix}%"));
            }
            query.push(")");
        }

        query.push(" GROUP BY app, uri ORDER BY hits DESC");

        let stats = query.build_query_as::<ViewStats>().fetch_all(&self.pool).await?;
        Ok(stats)
    }
}
