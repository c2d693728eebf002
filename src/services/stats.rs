//! Stats service (server side)
//!
//! Thin layer between the stats handlers and the hit repository: records
//! hits and resolves the raw query-string range before aggregation.

use tracing::info;

use crate::database::repositories::StatsRepository;
use crate::models::stats::{EndpointHit, EndpointHitDto, ViewStats};
use crate::utils::datetime;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct StatsService {
    repository: StatsRepository,
}

impl StatsService {
    pub fn new(repository: StatsRepository) -> Self {
        Self { repository }
    }

    /// Append one hit row
    pub async fn record_hit(&self, dto: EndpointHitDto) -> Result<EndpointHit> {
        let hit = self
            .repository
            .save_hit(&dto.app, &dto.uri, &dto.ip, dto.timestamp)
            .await?;
        info!(app = %hit.app, uri = %hit.uri, "Endpoint hit recorded");
        Ok(hit)
    }

    /// Aggregated view counts; `start`/`end` arrive as raw query strings and
    /// a malformed value is a bad request
    pub async fn view_stats(
        &self,
        start: &str,
        end: &str,
        uri_prefixes: &[String],
        unique: bool,
    ) -> Result<Vec<ViewStats>> {
        let start = datetime::parse(start)?;
        let end = datetime::parse(end)?;
        self.repository.view_stats(start, end, uri_prefixes, unique).await
    }
}
