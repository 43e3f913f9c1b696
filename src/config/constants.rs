//! Default timings and environment variable names
//!
//! This module centralizes the magic numbers of the live cache and the
//! binary so they can be found (and overridden) in one place.

use std::time::Duration;

/// Minimum spacing between processed head notifications.
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(500);

/// Fixed wait between losing the subscription and reconnecting.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3_000);

/// Per-request upstream timeout.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// How often an HTTP-only endpoint is polled for a new head.
pub const DEFAULT_HEAD_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// Reconnect attempts alloy makes on its own before closing a WebSocket
/// subscription. Kept at one so an outage reaches the cache's reconnect loop.
pub const WS_TRANSPORT_MAX_RETRIES: u32 = 1;

/// Port the HTTP layer listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Address the HTTP layer binds to when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Environment variable names read by [`AppConfig`](crate::AppConfig).
pub mod env {
    /// Upstream endpoint (`http(s)://` or `ws(s)://`)
    pub const RPC_URL: &str = "RPC_URL";
    /// Legacy name for the upstream endpoint, used when `RPC_URL` is unset
    pub const MONAD_RPC: &str = "MONAD_RPC";
    /// HTTP listen port
    pub const PORT: &str = "PORT";
    /// HTTP bind address
    pub const BIND_ADDR: &str = "BIND_ADDR";
    /// Throttle interval in milliseconds
    pub const THROTTLE_MS: &str = "THROTTLE_MS";
    /// Reconnect delay in milliseconds
    pub const RECONNECT_DELAY_MS: &str = "RECONNECT_DELAY_MS";
    /// Upstream request timeout in seconds
    pub const RPC_TIMEOUT_SECS: &str = "RPC_TIMEOUT_SECS";
    /// Head polling interval in milliseconds (HTTP endpoints only)
    pub const HEAD_POLL_INTERVAL_MS: &str = "HEAD_POLL_INTERVAL_MS";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnect_delay_exceeds_throttle() {
        assert!(DEFAULT_RECONNECT_DELAY > DEFAULT_THROTTLE_INTERVAL);
    }
}
