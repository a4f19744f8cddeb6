//! Time utilities and flow constants for the OpenFX demo rail.

use chrono::{DateTime, Duration, Utc};

/// Flow timing constants.
pub mod constants {
    use super::Duration;

    /// Quote validity window (30 seconds).
    pub fn quote_validity() -> Duration {
        Duration::seconds(30)
    }

    /// Elapsed time after which a transaction reads as sent (3 seconds).
    pub fn sent_after() -> Duration {
        Duration::seconds(3)
    }

    /// Elapsed time after which a transaction reads as settled (6 seconds).
    pub fn settled_after() -> Duration {
        Duration::seconds(6)
    }

    /// Transaction status polling interval (2 seconds).
    pub fn poll_interval() -> Duration {
        Duration::seconds(2)
    }

    /// Quote expiry checking cadence (1 second).
    pub fn expiry_check_cadence() -> Duration {
        Duration::seconds(1)
    }
}

/// A timestamp with timezone (always UTC for OpenFX).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Check whether a deadline has passed at the given instant.
///
/// Expiry is strict: the deadline instant itself is still valid, only
/// instants after it are expired. Every expiry decision in the workspace
/// goes through this predicate.
pub fn is_past(deadline: Timestamp, at: Timestamp) -> bool {
    at > deadline
}

/// Duration extensions for convenient construction.
pub trait DurationExt {
    fn as_std(&self) -> std::time::Duration;
}

impl DurationExt for Duration {
    fn as_std(&self) -> std::time::Duration {
        self.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        now()
    }
}

/// Manually driven clock for deterministic tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct ManualClock {
    current: parking_lot::Mutex<Timestamp>,
}

#[cfg(any(test, feature = "test-utils"))]
impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn starting_at(instant: Timestamp) -> Self {
        Self {
            current: parking_lot::Mutex::new(instant),
        }
    }

    /// Create a clock frozen at the current wall-clock time.
    pub fn from_now() -> Self {
        Self::starting_at(now())
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.current.lock() += by;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: Timestamp) {
        *self.current.lock() = instant;
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
