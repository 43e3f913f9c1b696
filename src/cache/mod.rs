// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Live block cache
//!
//! [`LiveBlockCache`] keeps an eventually-consistent copy of "latest block
//! number + transaction count", fed by a [`BlockSource`] heads stream and
//! resilient to transport drops.
//!
//! # Lifecycle
//!
//! A single supervisor task owns the subscription:
//!
//! 1. `Connecting`: subscribe to new heads. On failure go to 4.
//! 2. `Active`: fetch the current chain head once to seed the snapshot.
//! 3. Consume notifications one at a time until the stream errors or ends.
//! 4. `Failed`: drop the stream, wait the fixed reconnect delay, go to 1.
//!
//! There is no retry limit and no backoff; the loop runs until the cache is
//! stopped or every handle to it is dropped.
//!
//! # Reading
//!
//! Snapshots are published through a [`watch`] channel. Reads copy the
//! whole value, never block on the network, and never observe a block
//! number paired with another block's transaction count.
//!
//! ```rust,ignore
//! use blockpulse::{LiveBlockCache, LiveCacheConfig};
//!
//! let cache = LiveBlockCache::new(source, LiveCacheConfig::default());
//! cache.start();
//!
//! match cache.snapshot() {
//!     Some(snapshot) => println!("#{} ({} txs)", snapshot.block_number, snapshot.transaction_count),
//!     None => println!("no block observed yet"),
//! }
//! ```

mod stats;
mod throttle;

pub use stats::CacheStats;
pub use throttle::Throttle;

use std::sync::{Arc, Mutex, PoisonError};

use alloy_primitives::BlockNumber;
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn, Instrument};

use crate::config::LiveCacheConfig;
use crate::errors::LiveCacheError;
use crate::source::BlockSource;
use crate::tracing::spans;
use crate::types::snapshot::{BlockSnapshot, BlockSummary};
use crate::types::status::SubscriptionStatus;

use stats::StatsRecorder;

/// What happened to a single head notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotificationOutcome {
    /// Arrived inside the throttle window and was dropped
    Throttled,
    /// Fetched and committed
    Committed(BlockSnapshot),
    /// The fetch failed; snapshot and throttle untouched
    FetchFailed,
}

/// Cache of the latest observed block, kept current by a live subscription.
///
/// Cloning is cheap and every clone shares the same state. The supervisor
/// task is aborted when the last clone is dropped.
pub struct LiveBlockCache<S> {
    inner: Arc<Inner<S>>,
    supervisor: Arc<Supervisor>,
}

impl<S> Clone for LiveBlockCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            supervisor: Arc::clone(&self.supervisor),
        }
    }
}

impl<S> std::fmt::Debug for LiveBlockCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveBlockCache")
            .field("config", &self.inner.config)
            .field("status", &*self.inner.status.borrow())
            .field("snapshot", &*self.inner.snapshot.borrow())
            .finish_non_exhaustive()
    }
}

/// Handle to the supervisor task; aborts it on drop.
#[derive(Debug, Default)]
struct Supervisor {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Supervisor {
    fn take(&self) -> Option<JoinHandle<()>> {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        let task = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

/// State shared between the handles and the supervisor task.
struct Inner<S> {
    source: S,
    config: LiveCacheConfig,
    snapshot: watch::Sender<Option<BlockSnapshot>>,
    status: watch::Sender<SubscriptionStatus>,
    last_error: Mutex<Option<String>>,
    stats: StatsRecorder,
}

impl<S> LiveBlockCache<S>
where
    S: BlockSource,
{
    /// Create a cache over `source`. Nothing happens until [`start`](Self::start).
    pub fn new(source: S, config: LiveCacheConfig) -> Self {
        let (snapshot, _) = watch::channel(None);
        let (status, _) = watch::channel(SubscriptionStatus::Disconnected);

        Self {
            inner: Arc::new(Inner {
                source,
                config,
                snapshot,
                status,
                last_error: Mutex::new(None),
                stats: StatsRecorder::default(),
            }),
            supervisor: Arc::new(Supervisor::default()),
        }
    }

    /// Start the supervisor task.
    ///
    /// Idempotent: calling this while the task is running does nothing.
    /// Never fails; connection problems are logged and retried in the
    /// background. Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut task = self
            .supervisor
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if task.as_ref().is_some_and(|running| !running.is_finished()) {
            debug!("Live cache already running");
            return;
        }

        let span = spans::live_cache_supervisor(
            self.inner.config.throttle_interval.as_millis() as u64,
            self.inner.config.reconnect_delay.as_millis() as u64,
        );
        let inner = Arc::clone(&self.inner);
        *task = Some(tokio::spawn(inner.run().instrument(span)));

        info!("Live cache started");
    }

    /// Stop the supervisor task and wait for it to exit.
    ///
    /// The subscription is dropped and the status returns to
    /// `Disconnected`. The last snapshot stays readable. `start` may be
    /// called again afterwards.
    pub async fn stop(&self) {
        if let Some(task) = self.supervisor.take() {
            task.abort();
            // Cancellation is the expected outcome
            let _ = task.await;
            info!("Live cache stopped");
        }
        self.inner.set_status(SubscriptionStatus::Disconnected);
    }
}

impl<S> LiveBlockCache<S> {
    /// The latest committed snapshot, or `None` if no block has been
    /// observed yet.
    pub fn snapshot(&self) -> Option<BlockSnapshot> {
        *self.inner.snapshot.borrow()
    }

    /// Receiver that is notified whenever a new snapshot is committed.
    pub fn subscribe_snapshots(&self) -> watch::Receiver<Option<BlockSnapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// Current state of the upstream subscription.
    pub fn status(&self) -> SubscriptionStatus {
        *self.inner.status.borrow()
    }

    /// Receiver that is notified on every status transition.
    pub fn subscribe_status(&self) -> watch::Receiver<SubscriptionStatus> {
        self.inner.status.subscribe()
    }

    /// Copy of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.stats.snapshot()
    }

    /// Message of the most recent failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.inner
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the supervisor task is running.
    pub fn is_running(&self) -> bool {
        self.supervisor
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<S> Inner<S>
where
    S: BlockSource,
{
    /// Supervisor loop. Never returns.
    async fn run(self: Arc<Self>) {
        let mut throttle = Throttle::new(self.config.throttle_interval);

        loop {
            let attempt = self.stats.connection_attempt();
            let failure = self
                .connect_and_consume(&mut throttle)
                .instrument(spans::connect(attempt))
                .await;

            self.stats.transport_failure();
            self.set_status(SubscriptionStatus::Failed);
            warn!(
                error = %failure,
                attempt = attempt,
                reconnect_in_ms = self.config.reconnect_delay.as_millis() as u64,
                "Head subscription lost, scheduling reconnect"
            );
            self.set_last_error(&failure);

            tokio::time::sleep(self.config.reconnect_delay).await;
        }
    }

    /// Subscribe, seed, and consume until the transport fails.
    ///
    /// The heads stream is dropped on return, so the old subscription is
    /// gone before the next attempt subscribes again.
    async fn connect_and_consume(&self, throttle: &mut Throttle) -> LiveCacheError {
        self.set_status(SubscriptionStatus::Connecting);

        let mut heads = match self.source.subscribe_heads().await {
            Ok(heads) => heads,
            Err(source) => return LiveCacheError::StartupFailed { source },
        };

        self.set_status(SubscriptionStatus::Active);
        info!("Head subscription active");

        self.seed().instrument(spans::seed_snapshot()).await;

        while let Some(event) = heads.next().await {
            match event {
                Ok(block_number) => {
                    self.handle_notification(block_number, throttle)
                        .instrument(spans::handle_notification(block_number))
                        .await;
                }
                Err(source) => return LiveCacheError::TransportFailed { source },
            }
        }

        LiveCacheError::TransportClosed
    }

    /// Fetch the chain head once so readers have data before the first
    /// notification. Does not touch the throttle.
    async fn seed(&self) {
        let head = match self.source.block_number().await {
            Ok(head) => head,
            Err(source) => {
                self.record_fetch_failure(LiveCacheError::HeadFetchFailed { source });
                return;
            }
        };

        match self.source.block_summary(head).await {
            Ok(summary) => {
                let snapshot = self.commit(summary);
                info!(
                    block_number = snapshot.block_number,
                    transaction_count = snapshot.transaction_count,
                    "Seeded snapshot from chain head"
                );
            }
            Err(source) => self.record_fetch_failure(LiveCacheError::FetchFailed {
                block_number: head,
                source,
            }),
        }
    }

    async fn handle_notification(
        &self,
        block_number: BlockNumber,
        throttle: &mut Throttle,
    ) -> NotificationOutcome {
        let arrived = Instant::now();
        self.stats.notification();

        if throttle.should_skip(arrived) {
            self.stats.throttled();
            trace!("Notification throttled");
            return NotificationOutcome::Throttled;
        }

        match self.source.block_summary(block_number).await {
            Ok(summary) => {
                let snapshot = self.commit(summary);
                throttle.record(arrived);
                NotificationOutcome::Committed(snapshot)
            }
            Err(source) => {
                self.record_fetch_failure(LiveCacheError::FetchFailed {
                    block_number,
                    source,
                });
                NotificationOutcome::FetchFailed
            }
        }
    }

    fn commit(&self, summary: BlockSummary) -> BlockSnapshot {
        let snapshot = BlockSnapshot::from_summary(summary);
        self.snapshot.send_replace(Some(snapshot));
        self.stats.commit();

        debug!(
            block_number = snapshot.block_number,
            transaction_count = snapshot.transaction_count,
            "Snapshot committed"
        );

        snapshot
    }

    fn record_fetch_failure(&self, error: LiveCacheError) {
        self.stats.fetch_failure();
        warn!(error = %error, "Block fetch failed, keeping last snapshot");
        self.set_last_error(&error);
    }

    fn set_status(&self, next: SubscriptionStatus) {
        self.status.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            debug!(from = %current, to = %next, "Subscription status changed");
            *current = next;
            true
        });
    }

    fn set_last_error(&self, error: &LiveCacheError) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error.to_string());
    }
}
