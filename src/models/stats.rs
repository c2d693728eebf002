//! Statistics models
//!
//! `EndpointHit` rows are append-only: one row per tracked request.
//! `ViewStats` is a derived aggregate and is never persisted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::datetime::date_format;

#[derive(Debug, Clone, FromRow)]
pub struct EndpointHit {
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub created: NaiveDateTime,
}

/// Wire form of a hit, shared by the stats client and the stats server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointHitDto {
    pub app: String,
    pub uri: String,
    pub ip: String,
    #[serde(with = "date_format")]
    pub timestamp: NaiveDateTime,
}

impl From<&EndpointHit> for EndpointHitDto {
    fn from(hit: &EndpointHit) -> Self {
        Self {
            app: hit.app.clone(),
            uri: hit.uri.clone(),
            ip: hit.ip.clone(),
            timestamp: hit.created,
        }
    }
}

/// Aggregated view counts for one (app, uri) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ViewStats {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_dto_uses_api_timestamp_format() {
        let dto = EndpointHitDto {
            app: "ewm-main-service".to_string(),
            uri: "/events/3".to_string(),
            ip: "192.168.0.17".to_string(),
            timestamp: crate::utils::datetime::parse("2035-05-01 12:00:00").unwrap(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["timestamp"], "2035-05-01 12:00:00");
    }

    #[test]
    fn test_hit_dto_rejects_iso_timestamps() {
        let json = r#"{"app":"a","uri":"/u","ip":"1.2.3.4","timestamp":"2035-05-01T12:00:00"}"#;
        assert!(serde_json::from_str::<EndpointHitDto>(json).is_err());
    }

    #[test]
    fn test_view_stats_round_trip() {
        let json = r#"{"app":"ewm-main-service","uri":"/events/1","hits":42}"#;
        let stats: ViewStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.hits, 42);
        assert_eq!(stats.uri, "/events/1");
    }
}
