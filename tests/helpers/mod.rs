// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for blockpulse integration tests
//!
//! Provides a scriptable [`BlockSource`] so the live cache can be driven
//! without a real node.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::BlockNumber;
use async_trait::async_trait;
use blockpulse::{BlockHeads, BlockSource, BlockSummary, RpcError};
use tokio::sync::mpsc;

type HeadSender = mpsc::UnboundedSender<Result<BlockNumber, RpcError>>;

/// Mock BlockSource driven from the test body
///
/// Heads are pushed by the test through [`push_head`](Self::push_head).
/// Unknown blocks are served with `number % 1000` transactions unless
/// overridden with [`with_block`](Self::with_block). Clones share state, so
/// keep one clone for control and hand the other to the cache.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockBlockSource::new().with_head(100);
/// let cache = LiveBlockCache::new(source.clone(), config);
/// cache.start();
/// settle().await;
///
/// source.push_head(101);
/// settle().await;
/// ```
#[derive(Clone, Default)]
pub struct MockBlockSource {
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    head: Mutex<Option<BlockNumber>>,
    blocks: Mutex<HashMap<BlockNumber, usize>>,
    failing_blocks: Mutex<HashSet<BlockNumber>>,
    fail_once: Mutex<HashSet<BlockNumber>>,
    fetch_delay: Mutex<Duration>,
    subscribe_failures: AtomicUsize,
    sender: Mutex<Option<HeadSender>>,
    subscribe_calls: AtomicUsize,
    active_streams: Arc<AtomicUsize>,
    fetches: Mutex<Vec<BlockNumber>>,
}

/// Decrements the live stream count when the stream is dropped.
struct StreamGuard(Arc<AtomicUsize>);

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockBlockSource {
    /// Create a source with no chain head
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chain head reported by `block_number`
    pub fn with_head(self, head: BlockNumber) -> Self {
        self.set_head(head);
        self
    }

    /// Serve `block_number` with exactly `transaction_count` transactions
    pub fn with_block(self, block_number: BlockNumber, transaction_count: usize) -> Self {
        self.state
            .blocks
            .lock()
            .unwrap()
            .insert(block_number, transaction_count);
        self
    }

    /// Every fetch of `block_number` fails
    pub fn failing_block(self, block_number: BlockNumber) -> Self {
        self.state
            .failing_blocks
            .lock()
            .unwrap()
            .insert(block_number);
        self
    }

    /// The next fetch of `block_number` fails, later ones succeed
    pub fn failing_block_once(self, block_number: BlockNumber) -> Self {
        self.state.fail_once.lock().unwrap().insert(block_number);
        self
    }

    /// Every block fetch takes `delay` before answering
    pub fn with_fetch_delay(self, delay: Duration) -> Self {
        *self.state.fetch_delay.lock().unwrap() = delay;
        self
    }

    /// The next `count` subscribe attempts fail
    pub fn failing_subscribes(self, count: usize) -> Self {
        self.state.subscribe_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn set_head(&self, head: BlockNumber) {
        *self.state.head.lock().unwrap() = Some(head);
    }

    /// Deliver a new-head notification on the current subscription.
    ///
    /// Returns `false` if there is no live subscription.
    pub fn push_head(&self, block_number: BlockNumber) -> bool {
        self.send(Ok(block_number))
    }

    /// Emit a transport error on the current subscription
    pub fn fail_transport(&self, message: &str) -> bool {
        let error = RpcError::subscription_failed(
            "newHeads",
            io::Error::new(io::ErrorKind::ConnectionReset, message.to_string()),
        );
        self.send(Err(error))
    }

    /// End the current subscription stream
    pub fn close_transport(&self) {
        self.state.sender.lock().unwrap().take();
    }

    /// Block numbers fetched so far, in order
    pub fn fetches(&self) -> Vec<BlockNumber> {
        self.state.fetches.lock().unwrap().clone()
    }

    /// Number of subscribe attempts, successful or not
    pub fn subscribe_calls(&self) -> usize {
        self.state.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Number of head streams that are still alive
    pub fn active_streams(&self) -> usize {
        self.state.active_streams.load(Ordering::SeqCst)
    }

    fn send(&self, item: Result<BlockNumber, RpcError>) -> bool {
        self.state
            .sender
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|sender| sender.send(item).is_ok())
    }
}

#[async_trait]
impl BlockSource for MockBlockSource {
    async fn subscribe_heads(&self) -> Result<BlockHeads, RpcError> {
        self.state.subscribe_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.state.subscribe_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.state
                .subscribe_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(RpcError::ProviderConnectionFailed(
                "connection refused".to_string(),
            ));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        *self.state.sender.lock().unwrap() = Some(tx);

        self.state.active_streams.fetch_add(1, Ordering::SeqCst);
        let guard = StreamGuard(Arc::clone(&self.state.active_streams));

        let stream = futures::stream::unfold((rx, guard), |(mut rx, guard)| async move {
            rx.recv().await.map(|item| (item, (rx, guard)))
        });

        Ok(Box::pin(stream))
    }

    async fn block_number(&self) -> Result<BlockNumber, RpcError> {
        let head = *self.state.head.lock().unwrap();
        head.ok_or_else(|| {
            RpcError::get_block_number_failed(io::Error::new(
                io::ErrorKind::NotConnected,
                "no head configured",
            ))
        })
    }

    async fn block_summary(&self, block_number: BlockNumber) -> Result<BlockSummary, RpcError> {
        self.state.fetches.lock().unwrap().push(block_number);

        let delay = *self.state.fetch_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let fails = self.state.failing_blocks.lock().unwrap().contains(&block_number)
            || self.state.fail_once.lock().unwrap().remove(&block_number);
        if fails {
            return Err(RpcError::get_block_failed(
                block_number,
                io::Error::new(io::ErrorKind::TimedOut, "request timed out"),
            ));
        }

        let transaction_count = self
            .state
            .blocks
            .lock()
            .unwrap()
            .get(&block_number)
            .copied()
            .unwrap_or((block_number % 1000) as usize);

        Ok(BlockSummary::new(block_number, transaction_count))
    }
}

/// Let spawned tasks run until they block again.
///
/// With a paused clock this never advances time by itself.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused clock by `ms` and let tasks react.
pub async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}
