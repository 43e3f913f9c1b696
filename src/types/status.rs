// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream subscription lifecycle

use serde::Serialize;
use std::fmt;

/// Lifecycle state of the cache's upstream subscription.
///
/// ```text
/// Disconnected -> Connecting -> Active -> Failed -> Connecting -> ...
/// ```
///
/// A failed subscribe attempt goes straight from `Connecting` to `Failed`.
/// Only an explicit stop returns the cache to `Disconnected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Not started, or stopped
    #[default]
    Disconnected,
    /// Establishing the subscription
    Connecting,
    /// Subscription confirmed; notifications are being consumed
    Active,
    /// Subscription lost or never established; a reconnect is scheduled
    Failed,
}

impl SubscriptionStatus {
    /// Returns the lower-case name used in logs and JSON.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Disconnected => "disconnected",
            SubscriptionStatus::Connecting => "connecting",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disconnected() {
        assert_eq!(
            SubscriptionStatus::default(),
            SubscriptionStatus::Disconnected
        );
    }

    #[test]
    fn test_display_matches_serde() {
        for status in [
            SubscriptionStatus::Disconnected,
            SubscriptionStatus::Connecting,
            SubscriptionStatus::Active,
            SubscriptionStatus::Failed,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.to_string());
        }
    }
}
