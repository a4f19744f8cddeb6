//! Quote lifecycle state machine.
//!
//! A closed sum type over the states a requested quote can be in, with
//! transitions as the only way to change it. Loading and error states
//! carry no quote data, so stale-data combinations are unrepresentable.

use openfx_common::Timestamp;
use openfx_quote::Quote;
use parking_lot::Mutex;
use tracing::debug;

/// The lifecycle of a quote on the requesting side.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteLifecycle {
    /// No quote requested yet.
    Idle,
    /// Quote request in flight.
    Loading,
    /// Valid quote held; confirmable until `expires_at`.
    Success {
        quote: Quote,
        expires_at: Timestamp,
    },
    /// Validity window passed; the quote is retained read-only.
    Expired {
        quote: Quote,
        expires_at: Timestamp,
    },
    /// Quote request failed.
    Error { message: String },
}

impl QuoteLifecycle {
    /// The discriminant of this state.
    pub fn phase(&self) -> Phase {
        match self {
            QuoteLifecycle::Idle => Phase::Idle,
            QuoteLifecycle::Loading => Phase::Loading,
            QuoteLifecycle::Success { .. } => Phase::Success,
            QuoteLifecycle::Expired { .. } => Phase::Expired,
            QuoteLifecycle::Error { .. } => Phase::Error,
        }
    }
}

/// Lifecycle state discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Expired,
    Error,
}

/// Error when an event is not valid in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Phase,
    pub event: &'static str,
}

impl std::fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event {:?} not valid in state {:?}", self.event, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

/// Outcome of an expiry check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    /// The held quote just expired; the machine transitioned.
    Expired,
    /// The held quote is still inside its window.
    Pending,
    /// No quote is being tracked (not in success state).
    NotTracking,
}

/// Serialized single-writer wrapper around [`QuoteLifecycle`].
///
/// Every transition takes the one mutex, so concurrent transition
/// requests apply one at a time and observers always see a coherent
/// state.
pub struct QuoteStateMachine {
    state: Mutex<QuoteLifecycle>,
}

impl QuoteStateMachine {
    /// Create a machine in the idle state.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QuoteLifecycle::Idle),
        }
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> QuoteLifecycle {
        self.state.lock().clone()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().phase()
    }

    /// Begin a quote request. Valid from idle, error and expired.
    pub fn begin_request(&self) -> Result<(), InvalidTransition> {
        let mut state = self.state.lock();
        match state.phase() {
            Phase::Idle | Phase::Error | Phase::Expired => {
                *state = QuoteLifecycle::Loading;
                debug!("Lifecycle -> loading");
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                event: "begin_request",
            }),
        }
    }

    /// A quote arrived for the in-flight request.
    pub fn quote_arrived(&self, quote: Quote) -> Result<(), InvalidTransition> {
        let mut state = self.state.lock();
        match state.phase() {
            Phase::Loading => {
                let expires_at = quote.expires_at;
                *state = QuoteLifecycle::Success { quote, expires_at };
                debug!(expires_at = %expires_at, "Lifecycle -> success");
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                event: "quote_arrived",
            }),
        }
    }

    /// The in-flight request failed.
    pub fn quote_failed(&self, message: impl Into<String>) -> Result<(), InvalidTransition> {
        let mut state = self.state.lock();
        match state.phase() {
            Phase::Loading => {
                let message = message.into();
                debug!(message = %message, "Lifecycle -> error");
                *state = QuoteLifecycle::Error { message };
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                event: "quote_failed",
            }),
        }
    }

    /// Check the held quote against the clock, expiring it if its window
    /// has passed. Correct at any cadence: a check at any instant after
    /// `expires_at` transitions to expired.
    pub fn expiry_check(&self, now: Timestamp) -> ExpiryCheck {
        let mut state = self.state.lock();
        match &*state {
            QuoteLifecycle::Success { quote, expires_at } => {
                if quote.is_expired(now) {
                    let quote = quote.clone();
                    let expires_at = *expires_at;
                    *state = QuoteLifecycle::Expired { quote, expires_at };
                    debug!("Lifecycle -> expired");
                    ExpiryCheck::Expired
                } else {
                    ExpiryCheck::Pending
                }
            }
            _ => ExpiryCheck::NotTracking,
        }
    }

    /// Drop an error state back to idle. No-op in any other state.
    pub fn clear_error(&self) {
        let mut state = self.state.lock();
        if state.phase() == Phase::Error {
            *state = QuoteLifecycle::Idle;
        }
    }

    /// Return to idle from any state.
    pub fn reset(&self) {
        *self.state.lock() = QuoteLifecycle::Idle;
        debug!("Lifecycle -> idle");
    }
}

impl Default for QuoteStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
