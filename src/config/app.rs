//! Process-level configuration loaded from the environment

use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use super::constants::{env, DEFAULT_BIND_ADDR, DEFAULT_PORT};
use super::{LiveCacheConfig, LiveCacheConfigBuilder};
use crate::errors::ConfigError;
use crate::provider::ProviderConfig;

/// Everything the `blockpulse` binary needs to run.
///
/// # Example
///
/// ```rust
/// use blockpulse::AppConfig;
///
/// let config = AppConfig::from_lookup(|key| match key {
///     "RPC_URL" => Some("wss://rpc.example.org".to_string()),
///     "PORT" => Some("8080".to_string()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(config.port, 8080);
/// assert_eq!(config.provider.url, "wss://rpc.example.org");
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream provider settings
    pub provider: ProviderConfig,
    /// Live cache timings
    pub cache: LiveCacheConfig,
    /// HTTP bind address
    pub bind_addr: String,
    /// HTTP listen port
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no endpoint is configured or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no endpoint is configured or a value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let url = get(env::RPC_URL)
            .or_else(|| get(env::MONAD_RPC))
            .ok_or_else(|| ConfigError::missing(env::RPC_URL))?;

        let mut provider = ProviderConfig::new(url.trim());
        if let Some(secs) = parse_var::<u64>(&get, env::RPC_TIMEOUT_SECS)? {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = parse_var::<u64>(&get, env::HEAD_POLL_INTERVAL_MS)? {
            if ms == 0 {
                return Err(ConfigError::invalid(
                    env::HEAD_POLL_INTERVAL_MS,
                    "0",
                    "poll interval must be positive",
                ));
            }
            provider = provider.with_head_poll_interval(Duration::from_millis(ms));
        }

        let mut cache = LiveCacheConfigBuilder::new();
        if let Some(ms) = parse_var::<u64>(&get, env::THROTTLE_MS)? {
            cache = cache.throttle_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = parse_var::<u64>(&get, env::RECONNECT_DELAY_MS)? {
            cache = cache.reconnect_delay(Duration::from_millis(ms));
        }

        let port = parse_var::<u16>(&get, env::PORT)?.unwrap_or(DEFAULT_PORT);
        let bind_addr = get(env::BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            provider,
            cache: cache.build(),
            bind_addr,
            port,
        })
    }

    /// `host:port` string for binding the HTTP listener.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::invalid(name, raw, e)),
    }
}
