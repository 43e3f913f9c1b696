//! Error types for the blockpulse library.
//!
//! This module provides strongly-typed errors for all public APIs in
//! blockpulse, one enum per concern: [`RpcError`] for upstream calls,
//! [`LiveCacheError`] for what the cache observes, [`ConfigError`] for
//! environment loading.
//!
//! The live cache itself never returns errors to its callers: every failure
//! inside it resolves into "retry later" or "keep the last good snapshot".
//! [`LiveCacheError`] exists so those failures can be logged and inspected.
//!
//! # Examples
//!
//! ```rust
//! use blockpulse::{AppConfig, ConfigError};
//!
//! let error = AppConfig::from_lookup(|_| None).unwrap_err();
//! assert!(matches!(error, ConfigError::MissingVar { .. }));
//! ```

mod cache;
mod config;
mod rpc;

pub use cache::LiveCacheError;
pub use config::ConfigError;
pub use rpc::RpcError;
