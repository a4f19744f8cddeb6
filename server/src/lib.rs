//! OpenFX Server
//!
//! HTTP boundary for the transfer demo: three JSON endpoints over the
//! quote engine and the in-memory ledger, with optional simulated latency
//! and the configurable failure rates of the demo rail.

pub mod api;
pub mod config;
pub mod error;
pub mod latency;
pub mod state;

pub use api::app;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
