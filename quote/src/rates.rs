//! Static exchange-rate table.

use std::collections::HashMap;

use openfx_common::{Currency, SUPPORTED_CURRENCIES};
use rust_decimal::Decimal;

/// Unit rates for the supported currencies, keyed by code.
///
/// Rates are fixed at construction; the table never changes while the
/// process runs.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Build the table from the bundled currency list.
    pub fn bundled() -> Self {
        Self::with_rates(
            SUPPORTED_CURRENCIES
                .iter()
                .map(|info| (Currency::new(info.code), info.unit_rate)),
        )
    }

    /// Build a table from explicit rates.
    pub fn with_rates(rates: impl IntoIterator<Item = (Currency, Decimal)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Get the unit rate for a currency, if supported.
    pub fn unit_rate(&self, currency: &Currency) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    /// Check if a currency is in the table.
    pub fn is_supported(&self, currency: &Currency) -> bool {
        self.rates.contains_key(currency)
    }

    /// All supported currencies, sorted by code.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut codes: Vec<Currency> = self.rates.keys().cloned().collect();
        codes.sort_by(|a, b| a.code().cmp(b.code()));
        codes
    }

    /// Number of supported currencies.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::bundled()
    }
}
