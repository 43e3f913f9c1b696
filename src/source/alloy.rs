// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`BlockSource`] implementation over an alloy [`Provider`].
//!
//! # Provider Setup
//!
//! Subscriptions require a WebSocket-connected provider and the `ws` feature:
//!
//! ```rust,ignore
//! use alloy_provider::{ProviderBuilder, WsConnect};
//! use blockpulse::source::AlloyBlockSource;
//!
//! let ws = WsConnect::new("wss://eth-mainnet.example.com/ws");
//! let provider = ProviderBuilder::new().connect_ws(ws).await?;
//! let source = AlloyBlockSource::subscribing(provider);
//! ```
//!
//! HTTP-only endpoints fall back to polling the chain head:
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! let provider = ProviderBuilder::new().connect_http(rpc_url);
//! let source = AlloyBlockSource::polling(provider, Duration::from_secs(1));
//! ```

use std::time::Duration;

use alloy_primitives::BlockNumber;
use alloy_provider::Provider;
use alloy_rpc_types::BlockNumberOrTag;
use async_trait::async_trait;
use futures::stream;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{BlockHeads, BlockSource};
use crate::errors::RpcError;
use crate::types::snapshot::BlockSummary;

/// How an [`AlloyBlockSource`] learns about new heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadMode {
    /// `eth_subscribe("newHeads")` over a pub/sub transport
    Subscribe,
    /// Poll `eth_blockNumber` every `interval`, yielding each new head once
    Poll {
        /// Polling period
        interval: Duration,
    },
}

/// Block source backed by an alloy provider.
///
/// # Type Parameters
///
/// * `P` - Provider type; must be `Clone` so polling streams can own a handle
#[derive(Debug, Clone)]
pub struct AlloyBlockSource<P> {
    provider: P,
    mode: HeadMode,
}

impl<P> AlloyBlockSource<P>
where
    P: Provider + Clone + 'static,
{
    /// Create a source with an explicit head mode.
    pub fn new(provider: P, mode: HeadMode) -> Self {
        Self { provider, mode }
    }

    /// Create a source that subscribes to `newHeads`.
    pub fn subscribing(provider: P) -> Self {
        Self::new(provider, HeadMode::Subscribe)
    }

    /// Create a source that polls the chain head every `interval`.
    pub fn polling(provider: P, interval: Duration) -> Self {
        Self::new(provider, HeadMode::Poll { interval })
    }

    /// The head mode in use.
    pub fn mode(&self) -> HeadMode {
        self.mode
    }

    #[cfg(feature = "ws")]
    async fn subscribe_new_heads(&self) -> Result<BlockHeads, RpcError> {
        use futures::StreamExt;

        info!("Subscribing to new heads");

        let subscription = self
            .provider
            .subscribe_blocks()
            .await
            .map_err(|e| RpcError::subscription_failed("newHeads", e))?;

        debug!("Head subscription established");

        let heads = subscription.into_stream().map(|header| Ok(header.number));

        Ok(Box::pin(heads))
    }

    #[cfg(not(feature = "ws"))]
    async fn subscribe_new_heads(&self) -> Result<BlockHeads, RpcError> {
        Err(RpcError::ProviderConnectionFailed(
            "newHeads subscriptions require the `ws` feature".to_string(),
        ))
    }
}

#[async_trait]
impl<P> BlockSource for AlloyBlockSource<P>
where
    P: Provider + Clone + 'static,
{
    async fn subscribe_heads(&self) -> Result<BlockHeads, RpcError> {
        match self.mode {
            HeadMode::Subscribe => self.subscribe_new_heads().await,
            HeadMode::Poll { interval } => {
                info!(interval_ms = interval.as_millis() as u64, "Polling for new heads");
                Ok(poll_heads(self.provider.clone(), interval))
            }
        }
    }

    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)
    }

    async fn block_summary(&self, block_number: BlockNumber) -> Result<BlockSummary, RpcError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(block_number))
            .await
            .map_err(|e| RpcError::get_block_failed(block_number, e))?
            .ok_or(RpcError::BlockNotFound { block_number })?;

        Ok(BlockSummary::new(block.header.number, block.transactions.len()))
    }
}

/// Turn periodic `eth_blockNumber` calls into a heads stream.
///
/// The first tick fires immediately. Unchanged heads are skipped; a failed
/// call yields an `Err` item, which the cache treats as a transport failure.
fn poll_heads<P>(provider: P, interval: Duration) -> BlockHeads
where
    P: Provider + Clone + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let heads = stream::unfold(
        (provider, ticker, None::<BlockNumber>),
        |(provider, mut ticker, last_seen)| async move {
            loop {
                ticker.tick().await;
                match provider.get_block_number().await {
                    Ok(head) if Some(head) == last_seen => continue,
                    Ok(head) => return Some((Ok(head), (provider, ticker, Some(head)))),
                    Err(e) => {
                        return Some((
                            Err(RpcError::get_block_number_failed(e)),
                            (provider, ticker, last_seen),
                        ))
                    }
                }
            }
        },
    );

    Box::pin(heads)
}
