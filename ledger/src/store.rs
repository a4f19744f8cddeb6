//! Transaction storage port and the in-memory implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use openfx_common::TransactionId;

use crate::error::LedgerResult;
use crate::transaction::Transaction;

/// Storage port for transaction records.
///
/// The ledger only ever inserts immutable records and reads them back;
/// status is derived at read time, so the port needs no update operation
/// and reads stay idempotent.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, transaction: Transaction) -> LedgerResult<()>;

    /// Fetch the stored record, if any.
    async fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>>;
}

/// Process-local store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: DashMap<TransactionId, Transaction>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn insert(&self, transaction: Transaction) -> LedgerResult<()> {
        self.transactions.insert(transaction.id, transaction);
        Ok(())
    }

    async fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self.transactions.get(&id).map(|entry| entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openfx_common::now;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        let txn = Transaction::pending(TransactionId::new(), false, now());

        store.insert(txn.clone()).await.unwrap();

        let fetched = store.get(txn.id).await.unwrap();
        assert_eq!(fetched, Some(txn));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = MemoryStore::new();
        assert_eq!(store.get(TransactionId::new()).await.unwrap(), None);
    }
}
