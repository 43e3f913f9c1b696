//! Error types for loading configuration from the environment.

/// Errors that can occur while building an [`AppConfig`](crate::AppConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set (or is empty).
    #[error("Missing required environment variable {name}")]
    MissingVar {
        /// Variable name
        name: String,
    },

    /// A variable is set but cannot be parsed.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidVar {
        /// Variable name
        name: String,
        /// Raw value as read
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create a `MissingVar` error.
    pub fn missing(name: impl Into<String>) -> Self {
        ConfigError::MissingVar { name: name.into() }
    }

    /// Create an `InvalidVar` error.
    pub fn invalid(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        ConfigError::InvalidVar {
            name: name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
