//! Payment submission with a double-submit latch.
//!
//! Submitting a payment against a quote must happen at most once at a
//! time. The gate hands out a single permit for the duration of the
//! submission; the permit releases on drop, so a failed submission can
//! always be retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use openfx_common::{Clock, QuoteId, Result, TransactionId, TransferError};
use openfx_quote::Quote;
use tracing::{info, instrument, warn};

/// Submits a confirmed payment.
#[async_trait]
pub trait PaymentSubmitter: Send + Sync {
    /// Submit the payment for the given quote.
    async fn submit(&self, quote_id: QuoteId) -> Result<TransactionId>;
}

/// Latch preventing concurrent submissions.
#[derive(Debug, Default)]
pub struct PaymentGate {
    in_flight: AtomicBool,
}

impl PaymentGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the single submission permit.
    pub fn begin(&self) -> Result<PaymentPermit<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(TransferError::SubmissionInFlight);
        }
        Ok(PaymentPermit { gate: self })
    }

    /// Whether a submission is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held while a submission is outstanding; releases the gate on drop.
pub struct PaymentPermit<'a> {
    gate: &'a PaymentGate,
}

impl Drop for PaymentPermit<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}

/// Confirms payments against held quotes.
pub struct PaymentClient {
    gate: PaymentGate,
    submitter: Arc<dyn PaymentSubmitter>,
    clock: Arc<dyn Clock>,
}

impl PaymentClient {
    /// Create a payment client.
    pub fn new(submitter: Arc<dyn PaymentSubmitter>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gate: PaymentGate::new(),
            submitter,
            clock,
        }
    }

    /// Confirm a payment against a quote.
    ///
    /// The quote is validated here, before anything reaches the rail: an
    /// expired quote is rejected outright and no transaction is created.
    #[instrument(skip(self, quote), fields(quote_id = %quote.id))]
    pub async fn confirm(&self, quote: &Quote) -> Result<TransactionId> {
        if quote.is_expired(self.clock.now()) {
            warn!("Rejected submission against an expired quote");
            return Err(TransferError::QuoteExpired);
        }

        let _permit = self.gate.begin()?;

        let transaction_id = self.submitter.submit(quote.id).await?;

        info!(transaction_id = %transaction_id, "Payment accepted");
        Ok(transaction_id)
    }

    /// Whether a submission is currently outstanding.
    pub fn is_submitting(&self) -> bool {
        self.gate.is_in_flight()
    }
}
