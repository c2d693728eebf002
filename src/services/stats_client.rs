//! Stats service client
//!
//! HTTP client for the statistics service. `record_hit` is used by the
//! public read paths; callers treat it as fire-and-forget and log failures
//! instead of propagating them.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use tracing::debug;

use crate::config::StatsClientConfig;
use crate::models::stats::{EndpointHitDto, ViewStats};
use crate::utils::datetime;
use crate::utils::errors::{EwmError, Result};

/// Application name reported with every hit
pub const APP_NAME: &str = "ewm-main-service";

/// Client for the stats service HTTP API
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    /// Create a new StatsClient instance
    pub fn new(config: &StatsClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ewm-main-service/1.0")
            .build()
            .map_err(EwmError::Http)?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Record one hit against a tracked URI
    pub async fn record_hit(
        &self,
        uri: &str,
        ip: &str,
        timestamp: NaiveDateTime,
    ) -> Result<()> {
        let url = format!("{}/hit", self.base_url);
        let body = EndpointHitDto {
            app: APP_NAME.to_string(),
            uri: uri.to_string(),
            ip: ip.to_string(),
            timestamp,
        };

        debug!(uri = uri, ip = ip, "Recording endpoint hit");

        let response = self.client.post(&url).json(&body).send().await?;
        response.error_for_status()?;

        Ok(())
    }

    /// Query aggregated view counts for a time range
    pub async fn view_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: &[String],
        unique: bool,
    ) -> Result<Vec<ViewStats>> {
        let url = format!("{}/stats", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("start", datetime::format(start)),
            ("end", datetime::format(end)),
            ("unique", unique.to_string()),
        ];
        if !uris.is_empty() {
            query.push(("uris", uris.join(",")));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        let stats = response.error_for_status()?.json::<Vec<ViewStats>>().await?;

        Ok(stats)
    }
}
