//! Quote engine error types.

use openfx_common::{Currency, TransferError};
use thiserror::Error;

/// Errors that can occur when computing a quote.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// Amount was zero or negative.
    #[error("Amount must be a positive number")]
    InvalidAmount,

    /// One or both currency codes are not in the rate table.
    #[error("Unsupported currency pair: {source_currency}/{destination}")]
    UnsupportedPair {
        source_currency: Currency,
        destination: Currency,
    },
}

impl From<QuoteError> for TransferError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::InvalidAmount => TransferError::InvalidAmount,
            QuoteError::UnsupportedPair {
                source_currency,
                destination,
            } => TransferError::UnsupportedPair {
                source_currency,
                destination,
            },
        }
    }
}

/// Result type for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;
