// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # blockpulse
//!
//! Live chain-head cache for EVM JSON-RPC endpoints.
//!
//! [`LiveBlockCache`] subscribes to new-head notifications, throttles them,
//! fetches each accepted block's transaction count and publishes the result
//! as an atomic [`BlockSnapshot`]. When the subscription drops it reconnects
//! after a fixed delay, forever. Readers never touch the network.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blockpulse::provider::{create_block_source, ProviderConfig};
//! use blockpulse::{LiveBlockCache, LiveCacheConfig};
//!
//! let source = create_block_source(&ProviderConfig::new("wss://rpc.example.org"))?;
//! let cache = LiveBlockCache::new(source, LiveCacheConfig::default());
//! cache.start();
//!
//! let mut snapshots = cache.subscribe_snapshots();
//! snapshots.changed().await?;
//! println!("{:?}", cache.snapshot());
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the live cache, its throttle and counters
//! - [`source`]: where heads and blocks come from
//! - [`provider`]: alloy provider construction
//! - [`transport`]: tower layers for the RPC client
//! - [`api`]: axum read surface
//! - [`config`]: cache timings and environment loading

pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod errors;
pub mod provider;
pub mod source;
pub mod transport;
pub mod types;

pub(crate) mod tracing;

pub use cache::{CacheStats, LiveBlockCache, Throttle};
pub use config::{AppConfig, LiveCacheConfig, LiveCacheConfigBuilder};
pub use errors::{ConfigError, LiveCacheError, RpcError};
pub use provider::RpcBlockSource;
#[cfg(feature = "ws")]
pub use source::WsBlockSource;
pub use source::{AlloyBlockSource, BlockHeads, BlockSource, HeadMode};
pub use types::snapshot::{BlockSnapshot, BlockSummary};
pub use types::status::SubscriptionStatus;
