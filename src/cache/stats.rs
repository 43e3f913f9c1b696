// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Counters describing what the live cache has done so far

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free counters updated by the supervisor task.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    notifications: AtomicU64,
    throttled: AtomicU64,
    commits: AtomicU64,
    fetch_failures: AtomicU64,
    connection_attempts: AtomicU64,
    transport_failures: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn notification(&self) {
        self.notifications.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn throttled(&self) {
        self.throttled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the 1-based number of this attempt.
    pub(crate) fn connection_attempt(&self) -> u64 {
        self.connection_attempts.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn transport_failure(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            notifications: self.notifications.load(Ordering::Relaxed),
            throttled: self.throttled.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            connection_attempts: self.connection_attempts.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Head notifications received
    pub notifications: u64,
    /// Notifications dropped by the throttle
    pub throttled: u64,
    /// Snapshots committed, including seeds
    pub commits: u64,
    /// Block fetches that failed, including seeds
    pub fetch_failures: u64,
    /// Subscribe attempts, successful or not
    pub connection_attempts: u64,
    /// Subscriptions lost or never established
    pub transport_failures: u64,
}
