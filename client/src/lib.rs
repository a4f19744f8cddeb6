//! OpenFX Client
//!
//! Caller-side machinery for the transfer flow: the quote lifecycle state
//! machine with its countdown and expiry watcher, the payment submission
//! path with its double-submit latch, and the transaction status poller.
//!
//! All of it is transport-agnostic behind small ports; [`http::OpenFxApi`]
//! is the over-the-wire implementation against the three server endpoints.

pub mod countdown;
pub mod http;
pub mod lifecycle;
pub mod payment;
pub mod poller;

pub use countdown::{Countdown, ExpiryWatcher};
pub use http::OpenFxApi;
pub use lifecycle::{ExpiryCheck, InvalidTransition, Phase, QuoteLifecycle, QuoteStateMachine};
pub use payment::{PaymentClient, PaymentGate, PaymentPermit, PaymentSubmitter};
pub use poller::{await_terminal, poll_until_terminal, LedgerFetcher, PollConfig, StatusFetcher};
