// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across blockpulse.
//!
//! - Block snapshots and per-block summaries
//! - Subscription lifecycle states

pub mod snapshot;
pub mod status;

// Note: Public types are re-exported from lib.rs, not here
