// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! WebSocket block source that owns its connection.
//!
//! An alloy WebSocket provider gives up after its own reconnect attempts and
//! is unusable from then on. [`WsBlockSource`] never reuses a connection
//! across subscriptions: every [`subscribe_heads`](BlockSource::subscribe_heads)
//! performs a fresh handshake, so the cache's reconnect loop recovers from
//! outages of any length.

use std::sync::{Mutex, PoisonError};

use alloy_primitives::BlockNumber;
use async_trait::async_trait;
use tracing::debug;

use super::{AlloyBlockSource, BlockHeads, BlockSource};
use crate::errors::RpcError;
use crate::provider::{create_ws_provider, EthereumProvider, ProviderConfig};
use crate::types::snapshot::BlockSummary;

/// `newHeads` block source over a `ws://` or `wss://` endpoint.
///
/// Construction does not connect; the first subscribe does. Block fetches
/// go through the connection of the current subscription.
pub struct WsBlockSource {
    config: ProviderConfig,
    connection: Mutex<Option<AlloyBlockSource<EthereumProvider>>>,
}

impl WsBlockSource {
    /// Create a source for `config.url`.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    /// Whether a connection from the last subscribe is held.
    pub fn is_connected(&self) -> bool {
        self.lock().is_some()
    }

    fn current(&self) -> Result<AlloyBlockSource<EthereumProvider>, RpcError> {
        self.lock().clone().ok_or_else(|| {
            RpcError::ProviderConnectionFailed(format!("{} is not connected", self.config.url))
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<AlloyBlockSource<EthereumProvider>>> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for WsBlockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsBlockSource")
            .field("url", &self.config.url)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[async_trait]
impl BlockSource for WsBlockSource {
    async fn subscribe_heads(&self) -> Result<BlockHeads, RpcError> {
        // The previous provider may have shut down; never subscribe on it again
        if self.lock().take().is_some() {
            debug!("Dropped previous WebSocket connection");
        }

        let provider = create_ws_provider(&self.config).await?;
        let source = AlloyBlockSource::subscribing(provider);
        let heads = source.subscribe_heads().await?;

        *self.lock() = Some(source);
        Ok(heads)
    }

    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        self.current()?.block_number().await
    }

    async fn block_summary(&self, block_number: BlockNumber) -> Result<BlockSummary, RpcError> {
        self.current()?.block_summary(block_number).await
    }
}
