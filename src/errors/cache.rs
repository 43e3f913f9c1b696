//! Error types for the live block cache.
//!
//! None of these ever escape the supervisor task. They are logged, counted,
//! and kept as the cache's `last_error` for diagnostics.

use super::RpcError;

/// Failures observed by the live block cache.
///
/// A throttled notification is not an error and has no variant here; see
/// the cache counts it under `throttled` instead.
#[derive(Debug, thiserror::Error)]
pub enum LiveCacheError {
    /// Fetching the block behind a notification (or the seed) failed.
    ///
    /// Transient: the snapshot keeps its last good value.
    #[error("Fetch of block {block_number} failed: {source}")]
    FetchFailed {
        /// Block the fetch was for
        block_number: u64,
        /// Underlying RPC failure
        #[source]
        source: RpcError,
    },

    /// Fetching the chain head for the initial seed failed.
    #[error("Fetch of chain head failed: {source}")]
    HeadFetchFailed {
        /// Underlying RPC failure
        #[source]
        source: RpcError,
    },

    /// The heads stream yielded a transport error.
    #[error("Transport failed: {source}")]
    TransportFailed {
        /// Underlying RPC failure
        #[source]
        source: RpcError,
    },

    /// The heads stream ended.
    #[error("Transport closed by upstream")]
    TransportClosed,

    /// The subscription could not be established.
    #[error("Startup failed: {source}")]
    StartupFailed {
        /// Underlying RPC failure
        #[source]
        source: RpcError,
    },
}
