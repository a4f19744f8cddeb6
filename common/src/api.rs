//! Wire messages shared between the HTTP boundary and its clients.

use crate::{QuoteId, TransactionId};
use serde::{Deserialize, Serialize};

/// Body of `POST /pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    /// Quote the payment confirms.
    pub quote_id: QuoteId,
}

/// Success body of `POST /pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    /// Ledger entry created for the confirmed payment.
    pub transaction_id: TransactionId,
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short human-readable message.
    pub error: String,
}
