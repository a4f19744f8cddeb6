//! Countdown and the expiry watcher driving the lifecycle machine.

use std::sync::Arc;
use std::time::Duration;

use openfx_common::{is_past, Clock, Timestamp};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::lifecycle::{ExpiryCheck, QuoteStateMachine};

/// Whole-second countdown to an absolute expiry instant.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    expires_at: Timestamp,
}

impl Countdown {
    /// Create a countdown to the given instant.
    pub fn until(expires_at: Timestamp) -> Self {
        Self { expires_at }
    }

    /// Whole seconds remaining, zero once the window has passed.
    pub fn seconds_left(&self, now: Timestamp) -> u64 {
        let remaining = self.expires_at - now;
        remaining.num_seconds().max(0) as u64
    }

    /// Whether the instant has passed (strict).
    pub fn is_expired(&self, now: Timestamp) -> bool {
        is_past(self.expires_at, now)
    }
}

/// Periodic expiry checker for a shared lifecycle machine.
///
/// Spawns a timer task that calls `expiry_check` each tick and stops
/// after the quote expires or the machine stops tracking one. Cancelling
/// (or dropping) the watcher aborts the task, so no transition can fire
/// after teardown.
pub struct ExpiryWatcher {
    handle: JoinHandle<()>,
}

impl ExpiryWatcher {
    /// Start watching with the given cadence.
    pub fn spawn(
        machine: Arc<QuoteStateMachine>,
        clock: Arc<dyn Clock>,
        cadence: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(cadence);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;
                match machine.expiry_check(clock.now()) {
                    ExpiryCheck::Expired => {
                        debug!("Quote expired; watcher stopping");
                        break;
                    }
                    ExpiryCheck::Pending => {}
                    ExpiryCheck::NotTracking => break,
                }
            }
        });

        Self { handle }
    }

    /// Stop the watcher. No further checks run after this returns.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the watcher task has finished or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ExpiryWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
