// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use crate::config::constants::{DEFAULT_HEAD_POLL_INTERVAL, DEFAULT_RPC_TIMEOUT};
use crate::errors::RpcError;

/// Transport family of an endpoint, derived from its URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `http://` or `https://`: request/response only, heads are polled
    Http,
    /// `ws://` or `wss://`: supports `eth_subscribe`
    WebSocket,
}

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use blockpulse::provider::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new("wss://eth.example.com/ws")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Upper bound on any single upstream request
    pub timeout: Duration,
    /// Head polling interval, used only for HTTP endpoints
    pub head_poll_interval: Duration,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_RPC_TIMEOUT,
            head_poll_interval: DEFAULT_HEAD_POLL_INTERVAL,
        }
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the head polling interval for HTTP endpoints
    #[must_use]
    pub fn with_head_poll_interval(mut self, interval: Duration) -> Self {
        self.head_poll_interval = interval;
        self
    }

    /// Parse the URL.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::ProviderUrlInvalid`] if the URL is malformed.
    pub fn parsed_url(&self) -> Result<url::Url, RpcError> {
        self.url
            .parse()
            .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", self.url)))
    }

    /// Classify the endpoint by its URL scheme.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::ProviderUrlInvalid`] if the URL is malformed or
    /// its scheme is not one of `http`, `https`, `ws`, `wss`.
    pub fn endpoint_kind(&self) -> Result<EndpointKind, RpcError> {
        let url = self.parsed_url()?;
        match url.scheme() {
            "http" | "https" => Ok(EndpointKind::Http),
            "ws" | "wss" => Ok(EndpointKind::WebSocket),
            other => Err(RpcError::ProviderUrlInvalid(format!(
                "unsupported scheme {other:?} in {}",
                self.url
            ))),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}

/// Preset configurations for common endpoint types
impl ProviderConfig {
    /// Configuration preset for public endpoints (slower polling, shorter timeout)
    #[must_use]
    pub fn public_endpoint(url: impl Into<String>) -> Self {
        Self::new(url)
            .with_timeout(Duration::from_secs(15))
            .with_head_poll_interval(Duration::from_secs(2))
    }

    /// Configuration preset for local nodes
    #[must_use]
    pub fn local_node(url: impl Into<String>) -> Self {
        Self::new(url)
            .with_timeout(Duration::from_secs(120))
            .with_head_poll_interval(Duration::from_millis(250))
    }
}
