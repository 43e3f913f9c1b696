// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider construction
//!
//! This module turns a [`ProviderConfig`] into an alloy provider and, from
//! there, into the [`AlloyBlockSource`](crate::source::AlloyBlockSource) the
//! live cache consumes.
//!
//! - [`create_http_provider`] - HTTP provider with a per-request timeout
//! - [`create_ws_provider`] - WebSocket provider for `newHeads` subscriptions (requires `ws` feature)
//! - [`create_block_source`] - Picks subscription or polling from the URL scheme, returning a [`RpcBlockSource`]
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockpulse::provider::{create_block_source, ProviderConfig};
//!
//! // wss:// subscribes, https:// polls
//! let source = create_block_source(&ProviderConfig::new("wss://rpc.example.org"))?;
//! ```

mod config;
mod factory;

pub use config::{EndpointKind, ProviderConfig};
#[cfg(feature = "ws")]
pub use factory::create_ws_provider;
pub use factory::{create_block_source, create_http_provider, RpcBlockSource};

use alloy_network::Ethereum;

/// Type alias for a provider on the Ethereum network
///
/// Sufficient for head tracking on any EVM chain: only block numbers and
/// transaction lists are read.
pub type EthereumProvider = alloy_provider::RootProvider<Ethereum>;
