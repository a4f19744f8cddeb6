//! Ledger error types.

use openfx_common::{TransactionId, TransferError};
use thiserror::Error;

/// Errors that can occur in the transaction ledger.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// No transaction with the given id.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<LedgerError> for TransferError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => TransferError::TransactionNotFound(id),
            LedgerError::Storage(message) => TransferError::Network(message),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
