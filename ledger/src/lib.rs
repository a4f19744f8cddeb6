//! OpenFX Transaction Ledger
//!
//! In-memory ledger for transactions created from confirmed quotes. Status
//! is derived lazily from the record's age rather than advanced by a
//! background scheduler: `processing` until 3 seconds of age, `sent` until
//! 6, then `settled`. A record flagged failed at creation reads as `failed`
//! immediately, regardless of age.

pub mod error;
pub mod ledger;
pub mod store;
pub mod transaction;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerConfig};
pub use store::{MemoryStore, TransactionRepository};
pub use transaction::{StatusSchedule, Transaction, TransactionStatus};
