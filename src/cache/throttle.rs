// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Minimum-interval throttle for head notifications.
//!
//! This is a hard debounce, not a queue: a notification that arrives less
//! than `interval` after the last *committed* one is dropped and never
//! replayed. Only successful commits move the window, so a failed fetch
//! never causes the next notification to be skipped.

use std::time::Duration;

use tokio::time::Instant;

/// Time-based throttle anchored to the last successful commit.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl Throttle {
    /// Create a throttle that has not accepted anything yet.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Arrival time of the last committed notification.
    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }

    /// Whether a notification arriving at `now` falls inside the window.
    pub fn should_skip(&self, now: Instant) -> bool {
        self.last_accepted
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval)
    }

    /// Anchor the window at `now`; call only after a successful commit.
    pub fn record(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_notification_is_never_skipped() {
        let throttle = Throttle::new(INTERVAL);
        assert!(!throttle.should_skip(Instant::now()));
    }

    #[test]
    fn test_skips_inside_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(INTERVAL);
        throttle.record(start);

        assert!(throttle.should_skip(start));
        assert!(throttle.should_skip(start + Duration::from_millis(10)));
        assert!(throttle.should_skip(start + Duration::from_millis(499)));
    }

    #[test]
    fn test_accepts_at_window_boundary() {
        let start = Instant::now();
        let mut throttle = Throttle::new(INTERVAL);
        throttle.record(start);

        assert!(!throttle.should_skip(start + INTERVAL));
        assert!(!throttle.should_skip(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_window_only_moves_on_record() {
        let start = Instant::now();
        let mut throttle = Throttle::new(INTERVAL);
        throttle.record(start);

        // Checking does not move the anchor
        let later = start + Duration::from_millis(700);
        assert!(!throttle.should_skip(later));
        assert!(!throttle.should_skip(later + Duration::from_millis(10)));

        throttle.record(later);
        assert!(throttle.should_skip(later + Duration::from_millis(10)));
    }

    #[test]
    fn test_zero_interval_never_skips() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::ZERO);
        throttle.record(start);
        assert!(!throttle.should_skip(start));
    }

    #[test]
    fn test_clock_going_backwards_is_treated_as_inside_window() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut throttle = Throttle::new(INTERVAL);
        throttle.record(start);

        assert!(throttle.should_skip(start - Duration::from_millis(100)));
    }
}
