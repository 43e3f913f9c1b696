// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the HTTP read surface

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use blockpulse::api::router;
use blockpulse::{LiveBlockCache, LiveCacheConfig};
use helpers::{settle, MockBlockSource};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_latest_block_before_first_block_is_not_found() {
    let cache = LiveBlockCache::new(MockBlockSource::new(), LiveCacheConfig::default());

    let (status, body) = get(router(cache), "/latestblock").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No block observed yet" }));
}

#[tokio::test(start_paused = true)]
async fn test_latest_block_returns_snapshot() {
    let source = MockBlockSource::new().with_head(12_345).with_block(12_345, 87);
    let cache = LiveBlockCache::new(source, LiveCacheConfig::default());
    cache.start();
    settle().await;

    let (status, body) = get(router(cache), "/latestblock").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "latestBlock": 12_345, "transactions": 87 }));
}

#[tokio::test(start_paused = true)]
async fn test_latest_block_survives_upstream_failure() {
    let source = MockBlockSource::new().with_head(10).failing_block(11);
    let cache = LiveBlockCache::new(source.clone(), LiveCacheConfig::default());
    cache.start();
    settle().await;

    source.push_head(11);
    source.close_transport();
    settle().await;

    let (status, body) = get(router(cache), "/latestblock").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["latestBlock"], 10);
}

#[tokio::test(start_paused = true)]
async fn test_status_reports_lifecycle_and_counters() {
    let source = MockBlockSource::new().with_head(7).with_block(7, 2);
    let cache = LiveBlockCache::new(source, LiveCacheConfig::default());
    cache.start();
    settle().await;

    let (status, body) = get(router(cache), "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["latestBlock"], 7);
    assert_eq!(body["transactions"], 2);
    assert!(body["updatedAt"].is_string());
    assert!(body["lastError"].is_null());
    assert_eq!(body["stats"]["commits"], 1);
    assert_eq!(body["stats"]["connectionAttempts"], 1);
}

#[tokio::test(start_paused = true)]
async fn test_status_before_start() {
    let cache = LiveBlockCache::new(MockBlockSource::new(), LiveCacheConfig::default());

    let (status, body) = get(router(cache), "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "disconnected");
    assert!(body["latestBlock"].is_null());
    assert_eq!(body["stats"]["notifications"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_status_body_has_exactly_documented_fields() {
    let cache = LiveBlockCache::new(MockBlockSource::new(), LiveCacheConfig::default());

    let (_, body) = get(router(cache), "/status").await;

    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["lastError", "latestBlock", "stats", "status", "transactions", "updatedAt"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_route_is_not_found() {
    let cache = LiveBlockCache::new(MockBlockSource::new(), LiveCacheConfig::default());

    let response = router(cache)
        .oneshot(Request::builder().uri("/search/0xabc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
