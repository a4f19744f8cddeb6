//! Transaction record and status state machine.

use chrono::Duration;
use openfx_common::{constants, Currency, Timestamp, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction status over its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Payment accepted, transfer in flight.
    Processing,
    /// Funds handed off to the destination rail.
    Sent,
    /// Funds delivered; terminal.
    Settled,
    /// Transfer failed; terminal.
    Failed,
}

impl TransactionStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Settled | TransactionStatus::Failed)
    }

    /// Get valid next states from current state.
    pub fn valid_transitions(&self) -> &[TransactionStatus] {
        match self {
            TransactionStatus::Processing => {
                &[TransactionStatus::Sent, TransactionStatus::Failed]
            }
            TransactionStatus::Sent => &[TransactionStatus::Settled],
            TransactionStatus::Settled => &[],
            TransactionStatus::Failed => &[],
        }
    }

    /// Check if transition to the given state is valid.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        self.valid_transitions().contains(&next)
    }
}

/// Elapsed-time thresholds for deriving a transaction's status.
#[derive(Debug, Clone)]
pub struct StatusSchedule {
    /// Age at which a live transaction reads as sent.
    pub sent_after: Duration,
    /// Age at which a live transaction reads as settled.
    pub settled_after: Duration,
}

impl Default for StatusSchedule {
    fn default() -> Self {
        Self {
            sent_after: constants::sent_after(),
            settled_after: constants::settled_after(),
        }
    }
}

/// A ledger entry for an in-flight or completed transfer.
///
/// The stored record never changes after creation; the status a reader
/// sees is derived from the record's age, so concurrent readers need no
/// write coordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier.
    pub id: TransactionId,
    /// Status at the time of the snapshot.
    pub status: TransactionStatus,
    /// Currency the sender paid in.
    pub source_currency: Currency,
    /// Currency the recipient receives.
    pub destination_currency: Currency,
    /// Amount in the source currency.
    pub source_amount: Decimal,
    /// Amount in the destination currency.
    pub destination_amount: Decimal,
    /// Exchange rate applied.
    pub fx_rate: Decimal,
    /// Fee charged.
    pub fee: Decimal,
    /// When the transaction was created.
    pub created_at: Timestamp,
    /// When this snapshot was taken.
    pub updated_at: Timestamp,
    /// Failure decided once at creation; pins the status to failed.
    pub failed: bool,
}

impl Transaction {
    /// Create a fresh record in `processing` (or `failed`) status.
    ///
    /// Quotes are not retained server-side, so the transfer-detail fields
    /// stay unresolved placeholders on the demo rail.
    pub fn pending(id: TransactionId, failed: bool, now: Timestamp) -> Self {
        Self {
            id,
            status: if failed {
                TransactionStatus::Failed
            } else {
                TransactionStatus::Processing
            },
            source_currency: Currency::new(""),
            destination_currency: Currency::new(""),
            source_amount: Decimal::ZERO,
            destination_amount: Decimal::ZERO,
            fx_rate: Decimal::ZERO,
            fee: Decimal::ZERO,
            created_at: now,
            updated_at: now,
            failed,
        }
    }

    /// Status this record reads as at the given instant.
    pub fn status_at(&self, now: Timestamp, schedule: &StatusSchedule) -> TransactionStatus {
        if self.failed {
            return TransactionStatus::Failed;
        }

        let age = now - self.created_at;
        if age >= schedule.settled_after {
            TransactionStatus::Settled
        } else if age >= schedule.sent_after {
            TransactionStatus::Sent
        } else {
            TransactionStatus::Processing
        }
    }

    /// Produce the read snapshot for the given instant.
    pub fn snapshot_at(&self, now: Timestamp, schedule: &StatusSchedule) -> Self {
        let mut snapshot = self.clone();
        snapshot.status = self.status_at(now, schedule);
        snapshot.updated_at = now;
        snapshot
    }
}
