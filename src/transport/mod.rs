// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for Alloy providers.
//!
//! This module provides Tower-based middleware layers for customizing
//! the RPC transport behavior of Alloy providers.
//!
//! # Timeouts
//!
//! The [`TimeoutLayer`] bounds each upstream request. The live cache relies
//! on it: a fetch that never completes would otherwise stall the
//! notification loop forever.
//!
//! ```rust,ignore
//! use blockpulse::transport::TimeoutLayer;
//! use alloy_rpc_client::ClientBuilder;
//! use alloy_provider::ProviderBuilder;
//! use std::time::Duration;
//!
//! let client = ClientBuilder::default()
//!     .layer(TimeoutLayer::new(Duration::from_secs(30)))
//!     .http(rpc_url);
//!
//! let provider = ProviderBuilder::new()
//!     .disable_recommended_fillers()
//!     .connect_client(client);
//! ```

mod timeout;

pub use timeout::{TimeoutLayer, TimeoutService};
