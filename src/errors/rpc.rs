//! Shared RPC error types for block source operations.
//!
//! This module provides error types for the RPC failures that can occur when
//! the cache talks to an upstream node, either through a live subscription or
//! through plain request/response calls.

/// Errors that can occur during blockchain RPC operations.
///
/// Each variant carries enough context (block number, subscription kind,
/// endpoint) to make the log line useful on its own.
///
/// # Examples
///
/// ```rust
/// use blockpulse::RpcError;
///
/// let error = RpcError::BlockNotFound { block_number: 42 };
/// assert_eq!(error.to_string(), "Block not found: 42");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Block was not found at the specified block number.
    ///
    /// This can occur if the notification raced ahead of the node's own
    /// indexing, or if the block was dropped by a reorg.
    #[error("Block not found: {block_number}")]
    BlockNotFound {
        /// The block number that wasn't found
        block_number: u64,
    },

    /// Failed to fetch the current chain head.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch block details by number.
    ///
    /// This is different from `BlockNotFound`: the RPC call itself failed
    /// (network error, timeout, malformed response).
    #[error("Failed to fetch block {block_number} details")]
    GetBlockFailed {
        /// The block number we tried to fetch
        block_number: u64,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A pub/sub subscription could not be established or broke down.
    #[error("Subscription to {kind} failed")]
    SubscriptionFailed {
        /// The subscription kind, e.g. "newHeads"
        kind: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The endpoint URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// Connecting to the endpoint failed (e.g. WebSocket handshake).
    #[error("Provider connection failed: {0}")]
    ProviderConnectionFailed(String),
}

impl RpcError {
    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `SubscriptionFailed` error from any error type.
    pub fn subscription_failed(
        kind: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::SubscriptionFailed {
            kind: kind.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_get_block_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
        let error = RpcError::get_block_failed(100, io);

        assert_eq!(error.to_string(), "Failed to fetch block 100 details");
        assert_eq!(
            error.source().map(|s| s.to_string()),
            Some("deadline elapsed".to_string())
        );
    }

    #[test]
    fn test_subscription_failed_names_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let error = RpcError::subscription_failed("newHeads", io);
        assert_eq!(error.to_string(), "Subscription to newHeads failed");
    }
}
