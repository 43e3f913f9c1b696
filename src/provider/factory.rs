// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_primitives::BlockNumber;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;
use async_trait::async_trait;
use tracing::info;

use crate::errors::RpcError;
#[cfg(feature = "ws")]
use crate::source::WsBlockSource;
use crate::source::{AlloyBlockSource, BlockHeads, BlockSource};
use crate::types::snapshot::BlockSummary;
use crate::transport::TimeoutLayer;

use super::config::{EndpointKind, ProviderConfig};
use super::EthereumProvider;

/// Create an HTTP provider with the given configuration
///
/// Every request goes through a [`TimeoutLayer`] bounded by
/// `config.timeout`.
///
/// # Examples
///
/// ```rust,ignore
/// use blockpulse::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(&ProviderConfig::new("https://eth.llamarpc.com"))?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: &ProviderConfig) -> Result<EthereumProvider, RpcError> {
    let url = config.parsed_url()?;

    // Recommended fillers only matter for sending transactions
    let client = ClientBuilder::default()
        .layer(TimeoutLayer::new(config.timeout))
        .http(url);

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(client))
}

/// Create a WebSocket provider with the given configuration
///
/// WebSocket providers enable `newHeads` subscriptions. This function is
/// async because the connection requires a handshake.
///
/// alloy makes a single reconnect attempt when the socket drops; if that
/// fails the provider shuts down and its subscriptions end. Callers that
/// need to outlive an outage build a fresh provider, as
/// [`WsBlockSource`](crate::source::WsBlockSource) does.
///
/// # Errors
///
/// Returns an error if:
/// - The URL is malformed
/// - The WebSocket connection fails
#[cfg(feature = "ws")]
pub async fn create_ws_provider(config: &ProviderConfig) -> Result<EthereumProvider, RpcError> {
    use alloy_provider::WsConnect;

    use crate::config::constants::WS_TRANSPORT_MAX_RETRIES;

    config.parsed_url()?;
    let ws = WsConnect::new(config.url.as_str()).with_max_retries(WS_TRANSPORT_MAX_RETRIES);

    let client = ClientBuilder::default()
        .layer(TimeoutLayer::new(config.timeout))
        .ws(ws)
        .await
        .map_err(|e| RpcError::ProviderConnectionFailed(e.to_string()))?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(client))
}

/// Block source for a configured endpoint, see [`create_block_source`].
pub enum RpcBlockSource {
    /// HTTP endpoint; heads are polled
    Polling(AlloyBlockSource<EthereumProvider>),
    /// WebSocket endpoint; heads are subscribed over a connection rebuilt
    /// on every subscribe
    #[cfg(feature = "ws")]
    WebSocket(WsBlockSource),
}

impl std::fmt::Debug for RpcBlockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcBlockSource::Polling(source) => {
                f.debug_tuple("Polling").field(&source.mode()).finish()
            }
            #[cfg(feature = "ws")]
            RpcBlockSource::WebSocket(source) => f.debug_tuple("WebSocket").field(source).finish(),
        }
    }
}

#[async_trait]
impl BlockSource for RpcBlockSource {
    async fn subscribe_heads(&self) -> Result<BlockHeads, RpcError> {
        match self {
            RpcBlockSource::Polling(source) => source.subscribe_heads().await,
            #[cfg(feature = "ws")]
            RpcBlockSource::WebSocket(source) => source.subscribe_heads().await,
        }
    }

    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        match self {
            RpcBlockSource::Polling(source) => source.block_number().await,
            #[cfg(feature = "ws")]
            RpcBlockSource::WebSocket(source) => source.block_number().await,
        }
    }

    async fn block_summary(&self, block_number: BlockNumber) -> Result<BlockSummary, RpcError> {
        match self {
            RpcBlockSource::Polling(source) => source.block_summary(block_number).await,
            #[cfg(feature = "ws")]
            RpcBlockSource::WebSocket(source) => source.block_summary(block_number).await,
        }
    }
}

/// Create a [`RpcBlockSource`] for the configured endpoint
///
/// `ws://` and `wss://` endpoints subscribe to `newHeads` (requires the `ws`
/// feature) and connect lazily on the first subscribe; `http://` and
/// `https://` endpoints poll the chain head every
/// `config.head_poll_interval`.
///
/// # Errors
///
/// Returns an error if the URL is invalid or uses an unsupported scheme.
/// Connection problems are left to the cache's reconnect loop.
pub fn create_block_source(config: &ProviderConfig) -> Result<RpcBlockSource, RpcError> {
    match config.endpoint_kind()? {
        EndpointKind::Http => {
            info!(
                poll_interval_ms = config.head_poll_interval.as_millis() as u64,
                "Using HTTP endpoint, heads will be polled"
            );
            let provider = create_http_provider(config)?;
            Ok(RpcBlockSource::Polling(AlloyBlockSource::polling(
                provider,
                config.head_poll_interval,
            )))
        }
        #[cfg(feature = "ws")]
        EndpointKind::WebSocket => {
            info!("Using WebSocket endpoint, heads will be subscribed");
            Ok(RpcBlockSource::WebSocket(WsBlockSource::new(config.clone())))
        }
        #[cfg(not(feature = "ws"))]
        EndpointKind::WebSocket => Err(RpcError::ProviderUrlInvalid(format!(
            "{} needs the `ws` feature",
            config.url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::HeadMode;
    use std::time::Duration;

    #[test]
    fn test_create_http_provider_invalid_url() {
        let result = create_http_provider(&ProviderConfig::new("not-a-valid-url"));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_http_provider_valid_url() {
        let result = create_http_provider(&ProviderConfig::new("http://localhost:8545"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_http_endpoint_polls_heads() {
        let config = ProviderConfig::new("http://localhost:8545")
            .with_head_poll_interval(Duration::from_millis(750));

        match create_block_source(&config).unwrap() {
            RpcBlockSource::Polling(source) => assert_eq!(
                source.mode(),
                HeadMode::Poll {
                    interval: Duration::from_millis(750)
                }
            ),
            other => panic!("expected a polling source, got {other:?}"),
        }
    }

    #[cfg(feature = "ws")]
    #[test]
    fn test_ws_endpoint_connects_lazily() {
        // Nothing listens here; construction must still succeed
        let source = create_block_source(&ProviderConfig::new("ws://127.0.0.1:9")).unwrap();

        match source {
            RpcBlockSource::WebSocket(source) => assert!(!source.is_connected()),
            other => panic!("expected a WebSocket source, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_scheme_is_rejected() {
        let result = create_block_source(&ProviderConfig::new("ftp://example.org"));
        assert!(matches!(result, Err(RpcError::ProviderUrlInvalid(_))));
    }
}
