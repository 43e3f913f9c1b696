//! Span creation helpers for blockpulse operations.
//!
//! Telemetry concerns are kept apart from the cache logic: instead of
//! `#[instrument]` attributes, each instrumented operation has a span helper
//! here, attached to the future with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! async fn my_operation(&self, block_number: BlockNumber) {
//!     async {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(block_number))
//!     .await
//! }
//! ```

use alloy_primitives::BlockNumber;
use tracing::{Level, Span};

/// Create the root span of a cache's supervisor task.
///
/// Parent: None (lives for the lifetime of the task)
/// Children: connect spans
#[inline]
pub(crate) fn live_cache_supervisor(throttle_ms: u64, reconnect_delay_ms: u64) -> Span {
    tracing::span!(
        Level::INFO,
        "blockpulse.live_cache",
        throttle_ms = throttle_ms,
        reconnect_delay_ms = reconnect_delay_ms,
    )
}

/// Create span for one connect-seed-consume cycle.
///
/// Parent: live_cache_supervisor span
/// Children: seed_snapshot, handle_notification spans
#[inline]
pub(crate) fn connect(attempt: u64) -> Span {
    tracing::info_span!("blockpulse.connect", attempt = attempt)
}

/// Create span for the one-time head fetch after subscribing.
///
/// Parent: connect span
/// Children: RPC calls for chain head and block body
#[inline]
pub(crate) fn seed_snapshot() -> Span {
    tracing::debug_span!("blockpulse.seed_snapshot")
}

/// Create span for processing a single head notification.
///
/// Parent: connect span
/// Children: RPC call to fetch the block
#[inline]
pub(crate) fn handle_notification(block_number: BlockNumber) -> Span {
    tracing::debug_span!(
        "blockpulse.handle_notification",
        block_number = block_number,
    )
}
