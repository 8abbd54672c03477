//! Integration Tests for the Upstream Client
//!
//! Runs the real reqwest-backed client against an in-process axum server
//! standing in for the upstream host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use ohlcv_proxy::{
    api::create_router,
    error::ProxyError,
    models::{Interval, QueryKey},
    AppState, Config, UpstreamClient, UpstreamSource,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str, timeout: Duration) -> UpstreamClient {
    UpstreamClient::new(base_url, "Futures", timeout).unwrap()
}

async fn statistics(
    State(calls): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    calls.fetch_add(1, Ordering::SeqCst);
    let interval = params.get("Interval").cloned().unwrap_or_default();
    let asset_class = params.get("Asset_Class").cloned().unwrap_or_default();
    Json(json!([
        {"Symbol": "ES", "Interval": interval, "Asset_Class": asset_class, "Close": 5321.25},
        {"Symbol": "NQ", "Interval": interval, "Volume": 48213}
    ]))
}

async fn calendars() -> Json<Value> {
    Json(json!([
        {"Date": "2026-10-16", "Event": "CPI"},
        {"Date": "2026-10-17", "Event": "Retail Sales", "Importance": "High"}
    ]))
}

fn healthy_upstream(calls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/OHLCV_Statistics", get(statistics))
        .route("/Calendars", get(calendars))
        .with_state(calls)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Client Tests ==

#[tokio::test]
async fn test_fetch_statistics_sends_query() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base_url = spawn_upstream(healthy_upstream(calls.clone())).await;

    let records = client(&base_url, Duration::from_secs(5))
        .fetch(QueryKey::Statistics(Interval::FifteenMinutes))
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Interval"], "15M");
    assert_eq!(records[0]["Asset_Class"], "Futures");
    // Raw rows are returned un-normalized
    assert!(!records[1].contains_key("Close"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_calendars() {
    let base_url = spawn_upstream(healthy_upstream(Arc::new(AtomicUsize::new(0)))).await;

    let records = client(&base_url, Duration::from_secs(5))
        .fetch(QueryKey::Calendars)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["Importance"], "High");
}

#[tokio::test]
async fn test_non_success_status() {
    let upstream = Router::new().route(
        "/OHLCV_Statistics",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_upstream(upstream).await;

    let result = client(&base_url, Duration::from_secs(5))
        .fetch(QueryKey::Statistics(Interval::Last))
        .await;

    let err = tokio_test::assert_err!(result);
    assert!(matches!(err, ProxyError::UpstreamUnavailable(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_missing_route_is_unavailable() {
    let base_url = spawn_upstream(Router::new()).await;

    let result = client(&base_url, Duration::from_secs(5))
        .fetch(QueryKey::Calendars)
        .await;

    assert!(matches!(result, Err(ProxyError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_malformed_json() {
    let upstream = Router::new().route("/Calendars", get(|| async { "[{\"Date\": " }));
    let base_url = spawn_upstream(upstream).await;

    let result = client(&base_url, Duration::from_secs(5))
        .fetch(QueryKey::Calendars)
        .await;

    assert!(matches!(result, Err(ProxyError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_non_array_payload() {
    let upstream = Router::new().route(
        "/Calendars",
        get(|| async { Json(json!({"detail": "maintenance"})) }),
    );
    let base_url = spawn_upstream(upstream).await;

    let result = client(&base_url, Duration::from_secs(5))
        .fetch(QueryKey::Calendars)
        .await;

    assert!(matches!(result, Err(ProxyError::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn test_timeout() {
    let upstream = Router::new().route(
        "/OHLCV_Statistics",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    );
    let base_url = spawn_upstream(upstream).await;

    let result = client(&base_url, Duration::from_millis(200))
        .fetch(QueryKey::Statistics(Interval::OneMinute))
        .await;

    let err = tokio_test::assert_err!(result);
    assert!(matches!(err, ProxyError::UpstreamUnavailable(ref msg) if msg.contains("timed out")));
}

// == End-to-End Tests ==

#[tokio::test]
async fn test_proxy_end_to_end_normalizes_and_caches() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base_url = spawn_upstream(healthy_upstream(calls.clone())).await;

    let config = Config {
        upstream_base_url: base_url.clone(),
        ..Config::default()
    };
    let upstream = Arc::new(UpstreamClient::from_config(&config).unwrap());
    let app = create_router(AppState::from_config(&config, upstream));

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/data?interval=30M")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_to_json(response.into_body()).await;
        assert_eq!(
            json,
            json!([
                {"Symbol": "ES", "Interval": "30M", "Asset_Class": "Futures", "Close": 5321.25, "Volume": null},
                {"Symbol": "NQ", "Interval": "30M", "Asset_Class": null, "Close": null, "Volume": 48213}
            ])
        );

        for row in json.as_array().unwrap() {
            let keys: Vec<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys, ["Symbol", "Interval", "Asset_Class", "Close", "Volume"]);
        }
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
