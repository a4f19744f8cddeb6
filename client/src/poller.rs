//! Transaction status polling.
//!
//! Polling is a lazy, finite stream of snapshots: one immediate fetch,
//! then one per interval, ending at the first terminal snapshot or after
//! the consecutive-error budget runs out. Dropping the stream stops the
//! timer and abandons any in-flight fetch, so nothing observes or mutates
//! after cancellation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream};
use futures::StreamExt;
use openfx_common::{constants, DurationExt, Result, TransactionId, TransferError};
use openfx_ledger::{Ledger, Transaction};
use tracing::{debug, warn};

/// Configuration for a polling run.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between fetches.
    pub interval: Duration,
    /// Consecutive fetch failures tolerated before giving up.
    pub max_consecutive_errors: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: constants::poll_interval().as_std(),
            max_consecutive_errors: 3,
        }
    }
}

/// Source of transaction snapshots.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetch the current snapshot.
    async fn fetch(&self, id: TransactionId) -> Result<Transaction>;
}

/// In-process fetcher reading straight from a ledger.
pub struct LedgerFetcher {
    ledger: Arc<Ledger>,
}

impl LedgerFetcher {
    /// Create a fetcher over the given ledger.
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl StatusFetcher for LedgerFetcher {
    async fn fetch(&self, id: TransactionId) -> Result<Transaction> {
        Ok(self.ledger.get(id).await?)
    }
}

struct PollState {
    fetcher: Arc<dyn StatusFetcher>,
    id: TransactionId,
    config: PollConfig,
    first: bool,
    consecutive_errors: u32,
    done: bool,
}

/// Poll a transaction until a terminal snapshot is observed.
///
/// Successful fetches reset the consecutive-error counter and are
/// yielded; transient failures below the budget are absorbed. When the
/// budget is exhausted the stream yields a single
/// [`TransferError::PollingExhausted`] and ends.
pub fn poll_until_terminal(
    fetcher: Arc<dyn StatusFetcher>,
    id: TransactionId,
    config: PollConfig,
) -> impl Stream<Item = Result<Transaction>> {
    let state = PollState {
        fetcher,
        id,
        config,
        first: true,
        consecutive_errors: 0,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }

        loop {
            if state.first {
                state.first = false;
            } else {
                tokio::time::sleep(state.config.interval).await;
            }

            match state.fetcher.fetch(state.id).await {
                Ok(snapshot) => {
                    state.consecutive_errors = 0;
                    if snapshot.status.is_terminal() {
                        debug!(
                            transaction_id = %state.id,
                            status = ?snapshot.status,
                            "Terminal status observed; polling stops"
                        );
                        state.done = true;
                    }
                    return Some((Ok(snapshot), state));
                }
                Err(err) => {
                    state.consecutive_errors += 1;
                    warn!(
                        transaction_id = %state.id,
                        error = %err,
                        consecutive_errors = state.consecutive_errors,
                        "Status fetch failed"
                    );

                    if state.consecutive_errors >= state.config.max_consecutive_errors {
                        state.done = true;
                        return Some((
                            Err(TransferError::PollingExhausted {
                                attempts: state.consecutive_errors,
                            }),
                            state,
                        ));
                    }
                    // Below the budget: absorb and retry after the interval.
                }
            }
        }
    })
}

/// Drive a polling run to its final snapshot.
pub async fn await_terminal(
    fetcher: Arc<dyn StatusFetcher>,
    id: TransactionId,
    config: PollConfig,
) -> Result<Transaction> {
    let stream = poll_until_terminal(fetcher, id, config);
    futures::pin_mut!(stream);

    let mut last = None;
    while let Some(item) = stream.next().await {
        last = Some(item?);
    }

    last.ok_or_else(|| TransferError::Network("polling ended without a snapshot".into()))
}
