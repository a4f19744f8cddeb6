//! Ledger service: creates transactions and serves derived snapshots.

use std::sync::Arc;

use openfx_common::{Clock, FailureSampler, TransactionId};
use tracing::{debug, info, instrument};

use crate::error::{LedgerError, LedgerResult};
use crate::store::TransactionRepository;
use crate::transaction::{StatusSchedule, Transaction};

/// Configuration for the ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Probability that a created transaction is doomed to fail.
    pub failure_rate: f64,
    /// Thresholds for deriving status from age.
    pub schedule: StatusSchedule,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.05,
            schedule: StatusSchedule::default(),
        }
    }
}

/// The transaction ledger.
///
/// Records are immutable once created; the failure branch is decided
/// exactly once, at creation, through the injected sampler. Reads derive
/// the visible status from the record's age, so any number of observers
/// can poll concurrently without write contention.
pub struct Ledger {
    repository: Arc<dyn TransactionRepository>,
    clock: Arc<dyn Clock>,
    failures: Arc<dyn FailureSampler>,
    config: LedgerConfig,
}

impl Ledger {
    /// Create a new ledger.
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        clock: Arc<dyn Clock>,
        failures: Arc<dyn FailureSampler>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            failures,
            config,
        }
    }

    /// Allocate a new transaction.
    ///
    /// Validating the quote the payment was confirmed against is the
    /// caller's responsibility; the ledger never sees quotes.
    #[instrument(skip(self))]
    pub async fn create(&self) -> LedgerResult<Transaction> {
        let id = TransactionId::new();
        let failed = self.failures.roll(self.config.failure_rate);
        let transaction = Transaction::pending(id, failed, self.clock.now());

        self.repository.insert(transaction.clone()).await?;

        info!(
            transaction_id = %id,
            failed,
            "Transaction created"
        );

        Ok(transaction)
    }

    /// Get the current snapshot of a transaction.
    #[instrument(skip(self), fields(transaction_id = %id))]
    pub async fn get(&self, id: TransactionId) -> LedgerResult<Transaction> {
        let record = self
            .repository
            .get(id)
            .await?
            .ok_or(LedgerError::NotFound(id))?;

        let snapshot = record.snapshot_at(self.clock.now(), &self.config.schedule);

        debug!(status = ?snapshot.status, "Transaction read");

        Ok(snapshot)
    }

    /// The schedule this ledger derives status from.
    pub fn schedule(&self) -> &StatusSchedule {
        &self.config.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::transaction::TransactionStatus;
    use chrono::Duration;
    use openfx_common::{FixedOutcome, ManualClock};

    fn setup(failed: bool) -> (Ledger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::from_now());
        let ledger = Ledger::new(
            Arc::new(MemoryStore::new()),
            clock.clone(),
            Arc::new(FixedOutcome(failed)),
            LedgerConfig::default(),
        );
        (ledger, clock)
    }

    #[tokio::test]
    async fn test_create_starts_processing() {
        let (ledger, _clock) = setup(false);

        let txn = ledger.create().await.unwrap();

        assert_eq!(txn.status, TransactionStatus::Processing);
        assert!(!txn.failed);
        assert_eq!(txn.created_at, txn.updated_at);
    }

    #[tokio::test]
    async fn test_snapshot_reads_sent_after_four_seconds() {
        let (ledger, clock) = setup(false);
        let txn = ledger.create().await.unwrap();

        clock.advance(Duration::seconds(4));

        let snapshot = ledger.get(txn.id).await.unwrap();
        assert_eq!(snapshot.status, TransactionStatus::Sent);
        assert_eq!(snapshot.updated_at, clock.now());
    }

    #[tokio::test]
    async fn test_snapshot_reads_settled_after_seven_seconds() {
        let (ledger, clock) = setup(false);
        let txn = ledger.create().await.unwrap();

        clock.advance(Duration::seconds(7));

        let snapshot = ledger.get(txn.id).await.unwrap();
        assert_eq!(snapshot.status, TransactionStatus::Settled);
    }

    #[tokio::test]
    async fn test_failed_at_creation_reads_failed_immediately() {
        let (ledger, clock) = setup(true);
        let txn = ledger.create().await.unwrap();

        assert_eq!(
            ledger.get(txn.id).await.unwrap().status,
            TransactionStatus::Failed
        );

        clock.advance(Duration::seconds(30));
        assert_eq!(
            ledger.get(txn.id).await.unwrap().status,
            TransactionStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_reads_are_idempotent_at_a_fixed_instant() {
        let (ledger, clock) = setup(false);
        let txn = ledger.create().await.unwrap();

        clock.advance(Duration::seconds(4));

        let first = ledger.get(txn.id).await.unwrap();
        let second = ledger.get(txn.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (ledger, _clock) = setup(false);
        let id = TransactionId::new();

        assert_eq!(
            ledger.get(id).await,
            Err(LedgerError::NotFound(id))
        );
    }

    #[tokio::test]
    async fn test_concurrent_reads_see_consistent_snapshots() {
        let (ledger, clock) = setup(false);
        let ledger = Arc::new(ledger);
        let txn = ledger.create().await.unwrap();

        clock.advance(Duration::seconds(7));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let ledger = ledger.clone();
            let id = txn.id;
            handles.push(tokio::spawn(async move { ledger.get(id).await.unwrap() }));
        }

        for handle in handles {
            let snapshot = handle.await.unwrap();
            assert_eq!(snapshot.status, TransactionStatus::Settled);
        }
    }
}
