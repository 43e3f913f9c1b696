// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP read surface over a [`LiveBlockCache`].
//!
//! Handlers only read the published snapshot; they never talk to the RPC
//! endpoint and never surface upstream errors.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::cache::{CacheStats, LiveBlockCache};
use crate::source::BlockSource;
use crate::types::status::SubscriptionStatus;

/// Body of `GET /latestblock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockResponse {
    /// Latest observed block number
    pub latest_block: u64,
    /// Transaction count of that block
    pub transactions: usize,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Upstream subscription state
    pub status: SubscriptionStatus,
    /// Latest observed block number, if any
    pub latest_block: Option<u64>,
    /// Transaction count of that block
    pub transactions: Option<usize>,
    /// When the snapshot was committed
    pub updated_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure
    pub last_error: Option<String>,
    /// Cache counters
    pub stats: CacheStats,
}

/// Error body returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub error: String,
}

/// Build the router. Must be served from within the runtime the cache runs on.
pub fn router<S>(cache: LiveBlockCache<S>) -> Router
where
    S: BlockSource,
{
    Router::new()
        .route("/latestblock", get(latest_block::<S>))
        .route("/status", get(status::<S>))
        .with_state(cache)
}

async fn latest_block<S>(State(cache): State<LiveBlockCache<S>>) -> impl IntoResponse
where
    S: BlockSource,
{
    match cache.snapshot() {
        Some(snapshot) => (
            StatusCode::OK,
            Json(LatestBlockResponse {
                latest_block: snapshot.block_number,
                transactions: snapshot.transaction_count,
            }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No block observed yet".to_string(),
            }),
        )
            .into_response(),
    }
}

async fn status<S>(State(cache): State<LiveBlockCache<S>>) -> Json<StatusResponse>
where
    S: BlockSource,
{
    let snapshot = cache.snapshot();

    Json(StatusResponse {
        status: cache.status(),
        latest_block: snapshot.map(|s| s.block_number),
        transactions: snapshot.map(|s| s.transaction_count),
        updated_at: snapshot.map(|s| s.updated_at),
        last_error: cache.last_error(),
        stats: cache.stats(),
    })
}

/// Starts the API server and runs it until `shutdown` resolves.
pub async fn serve_api<S, F>(
    listener: TcpListener,
    cache: LiveBlockCache<S>,
    shutdown: F,
) -> anyhow::Result<()>
where
    S: BlockSource,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = router(cache);

    let addr = listener.local_addr()?;

    tracing::info!(address = ?addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
