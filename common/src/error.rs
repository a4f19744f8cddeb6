//! Error types for the OpenFX transfer flow.

use crate::{Currency, TransactionId};
use thiserror::Error;

/// Main error type for OpenFX operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    /// Quote amount was zero or negative.
    #[error("Amount must be a positive number")]
    InvalidAmount,

    /// One or both currency codes are not in the rate table.
    #[error("Unsupported currency pair: {source_currency}/{destination}")]
    UnsupportedPair {
        source_currency: Currency,
        destination: Currency,
    },

    /// Quote validity window has passed.
    #[error("Quote has expired. Please request a new quote.")]
    QuoteExpired,

    /// A payment submission is already outstanding for this quote.
    #[error("A payment is already being submitted")]
    SubmissionInFlight,

    /// Simulated processing failure at the payment rail.
    #[error("Payment processing failed. Please try again.")]
    PaymentProcessingFailed,

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Status polling gave up after too many consecutive fetch failures.
    #[error("Polling stopped after {attempts} consecutive errors")]
    PollingExhausted { attempts: u32 },

    /// Request rejected by the server.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),
}

impl TransferError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransferError::PaymentProcessingFailed | TransferError::Network(_)
        )
    }

    /// Get error code for wire messages and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::UnsupportedPair { .. } => "UNSUPPORTED_PAIR",
            TransferError::QuoteExpired => "QUOTE_EXPIRED",
            TransferError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            TransferError::PaymentProcessingFailed => "PAYMENT_PROCESSING_FAILED",
            TransferError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            TransferError::PollingExhausted { .. } => "POLLING_EXHAUSTED",
            TransferError::InvalidRequest(_) => "INVALID_REQUEST",
            TransferError::Network(_) => "NETWORK_ERROR",
        }
    }
}

/// Result type alias for OpenFX operations.
pub type Result<T> = std::result::Result<T, TransferError>;
