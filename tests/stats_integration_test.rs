//! Stats service aggregation tests against a real PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored`, either with a database at
//! `TEST_DATABASE_URL` or with Docker available for testcontainers.

mod helpers;

use serial_test::serial;

use ewm::database::repositories::StatsRepository;
use ewm::models::stats::EndpointHitDto;
use ewm::services::StatsService;
use ewm::utils::datetime;

use helpers::database_helper::TestDatabase;

fn hit(uri: &str, ip: &str, timestamp: &str) -> EndpointHitDto {
    EndpointHitDto {
        app: "ewm-main-service".to_string(),
        uri: uri.to_string(),
        ip: ip.to_string(),
        timestamp: datetime::parse(timestamp).unwrap(),
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_unique_counts_never_exceed_raw_counts() {
    let db = TestDatabase::new_stats().await.expect("test database");
    db.truncate_stats().await.expect("truncate");
    let service = StatsService::new(StatsRepository::new(db.pool.clone()));

    // three hits on one uri from two addresses, one hit on another
    service.record_hit(hit("/events/1", "10.0.0.1", "2035-05-01 10:00:00")).await.unwrap();
    service.record_hit(hit("/events/1", "10.0.0.1", "2035-05-01 11:00:00")).await.unwrap();
    service.record_hit(hit("/events/1", "10.0.0.2", "2035-05-01 12:00:00")).await.unwrap();
    service.record_hit(hit("/events/2", "10.0.0.3", "2035-05-01 13:00:00")).await.unwrap();

    let raw = service
        .view_stats("2035-05-01 00:00:00", "2035-05-02 00:00:00", &[], false)
        .await
        .unwrap();
    let unique = service
        .view_stats("2035-05-01 00:00:00", "2035-05-02 00:00:00", &[], true)
        .await
        .unwrap();

    // ordered by hit count descending
    assert_eq!(raw[0].uri, "/events/1");
    assert_eq!(raw[0].hits, 3);
    assert_eq!(raw[1].hits, 1);

    for stat in &unique {
        let raw_hits = raw.iter().find(|r| r.uri == stat.uri).map(|r| r.hits).unwrap();
        assert!(stat.hits <= raw_hits);
    }
    assert_eq!(unique.iter().find(|s| s.uri == "/events/1").unwrap().hits, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_uri_prefixes_and_range_restrict_results() {
    let db = TestDatabase::new_stats().await.expect("test database");
    db.truncate_stats().await.expect("truncate");
    let service = StatsService::new(StatsRepository::new(db.pool.clone()));

    service.record_hit(hit("/events/7", "10.0.1.1", "2035-06-01 10:00:00")).await.unwrap();
    service.record_hit(hit("/compilations/2", "10.0.1.1", "2035-06-01 10:05:00")).await.unwrap();
    service.record_hit(hit("/events/7", "10.0.1.2", "2035-07-01 10:00:00")).await.unwrap();

    // prefix filter keeps only /events URIs
    let stats = service
        .view_stats(
            "2035-06-01 00:00:00",
            "2035-06-30 00:00:00",
            &["/events".to_string()],
            false,
        )
        .await
        .unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].uri, "/events/7");
    assert_eq!(stats[0].hits, 1);

    // the July hit is outside the range
    let stats = service
        .view_stats("2035-06-01 00:00:00", "2035-12-31 00:00:00", &[], false)
        .await
        .unwrap();
    let events_hits = stats.iter().find(|s| s.uri == "/events/7").unwrap().hits;
    assert_eq!(events_hits, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL or run Docker)"]
async fn test_malformed_range_is_a_bad_request() {
    let db = TestDatabase::new_stats().await.expect("test database");
    db.truncate_stats().await.expect("truncate");
    let service = StatsService::new(StatsRepository::new(db.pool.clone()));

    let result = service.view_stats("last tuesday", "2035-06-30 00:00:00", &[], false).await;
    assert!(result.is_err());
}
