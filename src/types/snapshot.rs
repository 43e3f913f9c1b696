// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block snapshot types
//!
//! [`BlockSummary`] is what a block source reports for a single block;
//! [`BlockSnapshot`] is what the live cache publishes to readers.

use alloy_primitives::BlockNumber;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The parts of a block the cache cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    /// Block number
    pub number: BlockNumber,
    /// Number of transactions included in the block
    pub transaction_count: usize,
}

impl BlockSummary {
    /// Create a summary for `number` holding `transaction_count` transactions.
    #[must_use]
    pub fn new(number: BlockNumber, transaction_count: usize) -> Self {
        Self {
            number,
            transaction_count,
        }
    }
}

/// The latest committed chain state.
///
/// `block_number` and `transaction_count` always describe the same block:
/// a snapshot is built from one [`BlockSummary`] and published as a whole.
///
/// # Example
///
/// ```rust
/// use blockpulse::{BlockSnapshot, BlockSummary};
///
/// let snapshot = BlockSnapshot::from_summary(BlockSummary::new(100, 12));
/// assert_eq!(snapshot.block_number, 100);
/// assert_eq!(snapshot.transaction_count, 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSnapshot {
    /// Number of the latest observed block
    pub block_number: BlockNumber,
    /// Transaction count of that block
    pub transaction_count: usize,
    /// When the snapshot was committed
    pub updated_at: DateTime<Utc>,
}

impl BlockSnapshot {
    /// Build a snapshot from a fetched block, stamped with the current time.
    #[must_use]
    pub fn from_summary(summary: BlockSummary) -> Self {
        Self {
            block_number: summary.number,
            transaction_count: summary.transaction_count,
            updated_at: Utc::now(),
        }
    }

    /// The block this snapshot describes, without the timestamp.
    #[must_use]
    pub fn summary(&self) -> BlockSummary {
        BlockSummary::new(self.block_number, self.transaction_count)
    }
}
