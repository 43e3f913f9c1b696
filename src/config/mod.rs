//! Configuration for blockpulse
//!
//! This module provides the configuration of the live block cache and of the
//! binary that hosts it.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use blockpulse::LiveCacheConfig;
//! use std::time::Duration;
//!
//! // 500ms throttle, 3s reconnect delay
//! let config = LiveCacheConfig::default();
//! assert_eq!(config.throttle_interval, Duration::from_millis(500));
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use blockpulse::LiveCacheConfigBuilder;
//! use std::time::Duration;
//!
//! let config = LiveCacheConfigBuilder::new()
//!     .throttle_interval(Duration::from_millis(250))
//!     .reconnect_delay(Duration::from_secs(10))
//!     .build();
//! ```

use std::time::Duration;

mod app;
pub mod constants;

pub use app::AppConfig;

use constants::{DEFAULT_RECONNECT_DELAY, DEFAULT_THROTTLE_INTERVAL};

/// Configuration for a [`LiveBlockCache`](crate::LiveBlockCache)
///
/// Use [`LiveCacheConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCacheConfig {
    /// Minimum spacing between processed notifications
    /// Default: 500ms. `Duration::ZERO` disables throttling.
    pub throttle_interval: Duration,

    /// Fixed delay before re-subscribing after a transport failure
    /// Default: 3s
    pub reconnect_delay: Duration,
}

impl Default for LiveCacheConfig {
    fn default() -> Self {
        Self {
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

impl LiveCacheConfig {
    /// Create a config with no throttling
    ///
    /// Every notification triggers a fetch. Suitable for tests and for
    /// chains whose block time is well above the default throttle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blockpulse::LiveCacheConfig;
    /// use std::time::Duration;
    ///
    /// let config = LiveCacheConfig::unthrottled();
    /// assert_eq!(config.throttle_interval, Duration::ZERO);
    /// ```
    pub fn unthrottled() -> Self {
        Self {
            throttle_interval: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Builder for [`LiveCacheConfig`]
///
/// # Example
///
/// ```rust
/// use blockpulse::LiveCacheConfigBuilder;
/// use std::time::Duration;
///
/// let config = LiveCacheConfigBuilder::new()
///     .reconnect_delay(Duration::from_secs(1))
///     .build();
/// assert_eq!(config.throttle_interval, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LiveCacheConfigBuilder {
    config: LiveCacheConfig,
}

impl LiveCacheConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the throttle interval
    pub fn throttle_interval(mut self, interval: Duration) -> Self {
        self.config.throttle_interval = interval;
        self
    }

    /// Set the reconnect delay
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.config.reconnect_delay = delay;
        self
    }

    /// Build the configuration
    pub fn build(self) -> LiveCacheConfig {
        self.config
    }
}
