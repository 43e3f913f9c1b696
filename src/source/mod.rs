// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream block sources.
//!
//! A [`BlockSource`] is everything the live cache needs from a node: a push
//! stream of new head numbers, the current head, and per-block details.
//! [`AlloyBlockSource`] implements it on top of an alloy provider, either
//! through an `eth_subscribe("newHeads")` subscription or by polling
//! `eth_blockNumber` when the endpoint is HTTP-only. [`WsBlockSource`]
//! wraps the subscription flavor with a fresh connection per subscribe.
//!
//! # Stream contract
//!
//! - An `Ok(n)` item is a new-head notification for block `n`.
//! - An `Err(_)` item is a transport error; the consumer abandons the stream.
//! - The end of the stream means the transport closed.
//! - Dropping the stream tears the subscription down.

mod alloy;
#[cfg(feature = "ws")]
mod ws;

pub use self::alloy::{AlloyBlockSource, HeadMode};
#[cfg(feature = "ws")]
pub use self::ws::WsBlockSource;

use alloy_primitives::BlockNumber;
use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

use crate::errors::RpcError;
use crate::types::snapshot::BlockSummary;

/// Stream of new-head notifications produced by [`BlockSource::subscribe_heads`].
pub type BlockHeads = Pin<Box<dyn Stream<Item = Result<BlockNumber, RpcError>> + Send>>;

/// An upstream provider of chain heads and block details.
#[async_trait]
pub trait BlockSource: Send + Sync + 'static {
    /// Register for new-head notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription cannot be established.
    async fn subscribe_heads(&self) -> Result<BlockHeads, RpcError>;

    /// Fetch the current chain head height.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn block_number(&self) -> Result<BlockNumber, RpcError>;

    /// Fetch block `block_number` and summarize it.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::BlockNotFound`] if the node does not know the
    /// block, or another variant if the RPC call fails.
    async fn block_summary(&self, block_number: BlockNumber) -> Result<BlockSummary, RpcError>;
}
