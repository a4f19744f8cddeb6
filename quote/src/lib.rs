//! OpenFX Quote Engine
//!
//! Computes priced, time-limited quotes for a currency pair and source
//! amount against the bundled rate table.
//!
//! # Example
//!
//! ```rust,ignore
//! use openfx_quote::{QuoteEngine, QuoteEngineConfig, QuoteRequest, RateTable};
//! use openfx_common::{Currency, SystemClock};
//!
//! let engine = QuoteEngine::new(
//!     RateTable::bundled(),
//!     std::sync::Arc::new(SystemClock),
//!     QuoteEngineConfig::default(),
//! );
//!
//! let quote = engine.compute(&QuoteRequest {
//!     source_currency: Currency::usd(),
//!     destination_currency: Currency::eur(),
//!     amount: rust_decimal_macros::dec!(100),
//! })?;
//! ```

pub mod engine;
pub mod error;
pub mod quote;
pub mod rates;

pub use engine::{QuoteEngine, QuoteEngineConfig};
pub use error::{QuoteError, QuoteResult};
pub use quote::{Quote, QuoteRequest};
pub use rates::RateTable;
