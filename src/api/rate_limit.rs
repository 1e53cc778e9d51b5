//! Best-effort in-process rate limiting
//!
//! Each admitted request bumps a counter and schedules a decrement one window
//! later. This approximates a rolling window without tracking timestamps; a
//! burst at the end of one window still counts against the next.

use crate::error::{Result, StoreError};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::warn;

/// Soft cap on outgoing requests.
///
/// Owned by the API client; clones share the same counter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    in_flight: Arc<AtomicUsize>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_requests,
            window,
        }
    }

    /// Reserves a slot for one request or fails with [`StoreError::RateLimited`].
    ///
    /// Must be called from within a tokio runtime: the slot is released by a
    /// spawned timer task.
    pub fn acquire(&self) -> Result<()> {
        let admitted = self
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < self.max_requests).then_some(current + 1)
            });

        if admitted.is_err() {
            warn!(
                limit = self.max_requests,
                window_secs = self.window.as_secs(),
                "rate limit reached, rejecting request"
            );
            return Err(StoreError::RateLimited {
                limit: self.max_requests,
                window_secs: self.window.as_secs(),
            });
        }

        let counter = Arc::clone(&self.in_flight);
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            counter.fetch_sub(1, Ordering::AcqRel);
        });

        Ok(())
    }

    /// Requests counted against the current window.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }
}
