//! Quote types.

use openfx_common::{is_past, Currency, QuoteId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request for a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Currency the sender pays in.
    pub source_currency: Currency,
    /// Currency the recipient receives.
    pub destination_currency: Currency,
    /// Amount in the source currency.
    pub amount: Decimal,
}

/// A priced, time-limited offer to exchange a source amount into a
/// destination currency.
///
/// Immutable once issued. The server does not retain it; the client caches
/// it for the confirmation step and watches `expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Quote identifier.
    pub id: QuoteId,
    /// Currency the sender pays in.
    pub source_currency: Currency,
    /// Currency the recipient receives.
    pub destination_currency: Currency,
    /// Amount in the source currency.
    pub source_amount: Decimal,
    /// Amount the recipient receives, at `fx_rate`.
    pub destination_amount: Decimal,
    /// Exchange rate applied (destination units per source unit).
    pub fx_rate: Decimal,
    /// Fee charged on top of the source amount.
    pub fee: Decimal,
    /// Source amount plus fee.
    pub total_payable: Decimal,
    /// Instant after which the quote may no longer be confirmed.
    pub expires_at: Timestamp,
}

impl Quote {
    /// Check whether the quote has expired at the given instant.
    ///
    /// Strict comparison: at exactly `expires_at` the quote is still valid.
    pub fn is_expired(&self, at: Timestamp) -> bool {
        is_past(self.expires_at, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use openfx_common::now;
    use rust_decimal_macros::dec;

    fn sample_quote(expires_at: Timestamp) -> Quote {
        Quote {
            id: QuoteId::new(),
            source_currency: Currency::usd(),
            destination_currency: Currency::eur(),
            source_amount: dec!(100),
            destination_amount: dec!(92.00),
            fx_rate: dec!(0.92),
            fee: dec!(1.50),
            total_payable: dec!(101.50),
            expires_at,
        }
    }

    #[test]
    fn test_expiry_is_strict_at_the_boundary() {
        let expires_at = now();
        let quote = sample_quote(expires_at);

        assert!(!quote.is_expired(expires_at - Duration::seconds(1)));
        assert!(!quote.is_expired(expires_at));
        assert!(quote.is_expired(expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_quote_serde_round_trip() {
        let quote = sample_quote(now());

        let json = serde_json::to_string(&quote).unwrap();
        let parsed: Quote = serde_json::from_str(&json).unwrap();

        assert_eq!(quote, parsed);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let quote = sample_quote(now());
        let value = serde_json::to_value(&quote).unwrap();

        for field in [
            "id",
            "sourceCurrency",
            "destinationCurrency",
            "sourceAmount",
            "destinationAmount",
            "fxRate",
            "fee",
            "totalPayable",
            "expiresAt",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_request_round_trip() {
        let request = QuoteRequest {
            source_currency: Currency::usd(),
            destination_currency: Currency::new("NGN"),
            amount: dec!(250.75),
        };

        let json = serde_json::to_string(&request).unwrap();
        let parsed: QuoteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, parsed);
    }
}
