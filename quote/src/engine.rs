//! Quote computation.

use std::sync::Arc;

use chrono::Duration;
use openfx_common::{constants, round_amount, round_rate, Clock, QuoteId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, instrument};

use crate::error::{QuoteError, QuoteResult};
use crate::quote::{Quote, QuoteRequest};
use crate::rates::RateTable;

/// Fee rate applied to the source amount (0.5%).
const FEE_RATE: Decimal = dec!(0.005);

/// Minimum fee per transfer.
const FEE_FLOOR: Decimal = dec!(1.5);

/// Configuration for the quote engine.
#[derive(Debug, Clone)]
pub struct QuoteEngineConfig {
    /// How long an issued quote stays confirmable.
    pub validity: Duration,
}

impl Default for QuoteEngineConfig {
    fn default() -> Self {
        Self {
            validity: constants::quote_validity(),
        }
    }
}

/// Computes quotes against a static rate table.
///
/// The computation is deterministic given the inputs, the table and the
/// clock; the id is the only opaque part of an issued quote.
pub struct QuoteEngine {
    table: RateTable,
    clock: Arc<dyn Clock>,
    config: QuoteEngineConfig,
}

impl QuoteEngine {
    /// Create a new quote engine.
    pub fn new(table: RateTable, clock: Arc<dyn Clock>, config: QuoteEngineConfig) -> Self {
        Self {
            table,
            clock,
            config,
        }
    }

    /// Compute a quote for the requested pair and amount.
    #[instrument(skip(self), fields(
        source = %request.source_currency,
        destination = %request.destination_currency,
        amount = %request.amount,
    ))]
    pub fn compute(&self, request: &QuoteRequest) -> QuoteResult<Quote> {
        if request.amount <= Decimal::ZERO {
            return Err(QuoteError::InvalidAmount);
        }

        let (source_rate, destination_rate) = match (
            self.table.unit_rate(&request.source_currency),
            self.table.unit_rate(&request.destination_currency),
        ) {
            (Some(source), Some(destination)) => (source, destination),
            _ => {
                return Err(QuoteError::UnsupportedPair {
                    source_currency: request.source_currency.clone(),
                    destination: request.destination_currency.clone(),
                })
            }
        };

        let fx_rate = round_rate(destination_rate / source_rate);
        let fee = round_amount((request.amount * FEE_RATE).max(FEE_FLOOR));
        let total_payable = round_amount(request.amount + fee);
        let destination_amount = round_amount(request.amount * fx_rate);

        let quote = Quote {
            id: QuoteId::new(),
            source_currency: request.source_currency.clone(),
            destination_currency: request.destination_currency.clone(),
            source_amount: request.amount,
            destination_amount,
            fx_rate,
            fee,
            total_payable,
            expires_at: self.clock.now() + self.config.validity,
        };

        debug!(
            quote_id = %quote.id,
            fx_rate = %quote.fx_rate,
            total_payable = %quote.total_payable,
            expires_at = %quote.expires_at,
            "Quote computed"
        );

        Ok(quote)
    }

    /// The rate table this engine quotes from.
    pub fn rates(&self) -> &RateTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openfx_common::{Currency, ManualClock};
    use proptest::prelude::*;

    fn setup_engine(clock: Arc<dyn Clock>) -> QuoteEngine {
        QuoteEngine::new(RateTable::bundled(), clock, QuoteEngineConfig::default())
    }

    fn usd_to_eur(amount: Decimal) -> QuoteRequest {
        QuoteRequest {
            source_currency: Currency::usd(),
            destination_currency: Currency::eur(),
            amount,
        }
    }

    #[test]
    fn test_usd_to_eur_hundred() {
        let clock = Arc::new(ManualClock::from_now());
        let engine = setup_engine(clock.clone());

        let quote = engine.compute(&usd_to_eur(dec!(100))).unwrap();

        assert_eq!(quote.fx_rate, dec!(0.92));
        // 0.5% of 100 is 0.50, below the 1.50 floor.
        assert_eq!(quote.fee, dec!(1.50));
        assert_eq!(quote.total_payable, dec!(101.50));
        assert_eq!(quote.destination_amount, dec!(92.00));
        assert_eq!(quote.source_amount, dec!(100));
        assert_eq!(quote.expires_at, clock.now() + constants::quote_validity());
    }

    #[test]
    fn test_percentage_fee_above_floor() {
        let clock = Arc::new(ManualClock::from_now());
        let engine = setup_engine(clock);

        let quote = engine.compute(&usd_to_eur(dec!(1000))).unwrap();

        assert_eq!(quote.fee, dec!(5.00));
        assert_eq!(quote.total_payable, dec!(1005.00));
    }

    #[test]
    fn test_cross_rate_uses_unit_rates() {
        let clock = Arc::new(ManualClock::from_now());
        let engine = setup_engine(clock);

        let quote = engine
            .compute(&QuoteRequest {
                source_currency: Currency::eur(),
                destination_currency: Currency::new("JPY"),
                amount: dec!(10),
            })
            .unwrap();

        // 149.5 / 0.92 = 162.5 exactly.
        assert_eq!(quote.fx_rate, dec!(162.5));
        assert_eq!(quote.destination_amount, dec!(1625.00));
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        let clock = Arc::new(ManualClock::from_now());
        let engine = setup_engine(clock);

        assert_eq!(
            engine.compute(&usd_to_eur(Decimal::ZERO)),
            Err(QuoteError::InvalidAmount)
        );
        assert_eq!(
            engine.compute(&usd_to_eur(dec!(-5))),
            Err(QuoteError::InvalidAmount)
        );
    }

    #[test]
    fn test_unsupported_pair_never_returns_a_partial_quote() {
        let clock = Arc::new(ManualClock::from_now());
        let engine = setup_engine(clock);

        let result = engine.compute(&QuoteRequest {
            source_currency: Currency::usd(),
            destination_currency: Currency::new("XYZ"),
            amount: dec!(100),
        });

        assert!(matches!(result, Err(QuoteError::UnsupportedPair { .. })));

        let result = engine.compute(&QuoteRequest {
            source_currency: Currency::new("ABC"),
            destination_currency: Currency::eur(),
            amount: dec!(100),
        });

        assert!(matches!(result, Err(QuoteError::UnsupportedPair { .. })));
    }

    #[test]
    fn test_deterministic_given_clock() {
        let clock = Arc::new(ManualClock::from_now());
        let engine = setup_engine(clock);

        let a = engine.compute(&usd_to_eur(dec!(42))).unwrap();
        let b = engine.compute(&usd_to_eur(dec!(42))).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.fx_rate, b.fx_rate);
        assert_eq!(a.fee, b.fee);
        assert_eq!(a.total_payable, b.total_payable);
        assert_eq!(a.expires_at, b.expires_at);
    }

    proptest! {
        #[test]
        fn prop_fee_and_total(cents in 1i64..=10_000_000_00) {
            let amount = Decimal::new(cents, 2);
            let clock = Arc::new(ManualClock::from_now());
            let engine = setup_engine(clock);

            let quote = engine.compute(&usd_to_eur(amount)).unwrap();

            let expected_fee = round_amount((amount * dec!(0.005)).max(dec!(1.5)));
            prop_assert_eq!(quote.fee, expected_fee);
            prop_assert_eq!(quote.total_payable, round_amount(amount + expected_fee));
            prop_assert!(quote.fee >= dec!(1.5));
        }
    }
}
