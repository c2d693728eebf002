//! Contract tests for the stats client against a mocked stats service

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ewm::config::StatsClientConfig;
use ewm::services::StatsClient;
use ewm::utils::datetime;

fn client_for(server: &MockServer) -> StatsClient {
    StatsClient::new(&StatsClientConfig {
        server_url: server.uri(),
        timeout_seconds: 2,
    })
    .expect("client construction should not fail")
}

#[tokio::test]
async fn test_record_hit_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hit"))
        .and(body_partial_json(json!({
            "app": "ewm-main-service",
            "uri": "/events/5",
            "ip": "10.0.0.8",
            "timestamp": "2035-05-01 12:00:00",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let timestamp = datetime::parse("2035-05-01 12:00:00").unwrap();
    client
        .record_hit("/events/5", "10.0.0.8", timestamp)
        .await
        .expect("hit should be recorded");
}

#[tokio::test]
async fn test_record_hit_reports_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hit"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let timestamp = datetime::parse("2035-05-01 12:00:00").unwrap();
    let result = client.record_hit("/events/5", "10.0.0.8", timestamp).await;
    // callers swallow this, but the client must surface it
    assert!(result.is_err());
}

#[tokio::test]
async fn test_view_stats_builds_query_and_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .and(query_param("start", "2035-01-01 00:00:00"))
        .and(query_param("end", "2035-12-31 00:00:00"))
        .and(query_param("unique", "true"))
        .and(query_param("uris", "/events/1,/events/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"app": "ewm-main-service", "uri": "/events/1", "hits": 12},
            {"app": "ewm-main-service", "uri": "/events/2", "hits": 3},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stats = client
        .view_stats(
            datetime::parse("2035-01-01 00:00:00").unwrap(),
            datetime::parse("2035-12-31 00:00:00").unwrap(),
            &["/events/1".to_string(), "/events/2".to_string()],
            true,
        )
        .await
        .expect("stats should parse");

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].uri, "/events/1");
    assert_eq!(stats[0].hits, 12);
    // descending order is preserved as delivered
    assert!(stats[0].hits >= stats[1].hits);
}

#[tokio::test]
async fn test_view_stats_omits_uris_when_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .and(query_param("unique", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let stats = client
        .view_stats(
            datetime::parse("2035-01-01 00:00:00").unwrap(),
            datetime::parse("2035-12-31 00:00:00").unwrap(),
            &[],
            false,
        )
        .await
        .expect("stats should parse");
    assert!(stats.is_empty());

    // no `uris` parameter was sent at all
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "uris"));
}
