//! Supported currencies and their display metadata.
//!
//! The set of supported currencies is fixed at compile time. Each entry
//! carries a unit rate expressed against the USD base, which is what the
//! quote engine derives pair rates from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-style currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Static metadata for a supported currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// Currency code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// Unit rate against the USD base.
    pub unit_rate: Decimal,
}

/// All currencies the demo rail supports, with unit rates against USD.
pub static SUPPORTED_CURRENCIES: [CurrencyInfo; 10] = [
    CurrencyInfo { code: "USD", name: "US Dollar", symbol: "$", unit_rate: dec!(1) },
    CurrencyInfo { code: "EUR", name: "Euro", symbol: "\u{20AC}", unit_rate: dec!(0.92) },
    CurrencyInfo { code: "GBP", name: "British Pound", symbol: "\u{A3}", unit_rate: dec!(0.79) },
    CurrencyInfo { code: "JPY", name: "Japanese Yen", symbol: "\u{A5}", unit_rate: dec!(149.5) },
    CurrencyInfo { code: "CAD", name: "Canadian Dollar", symbol: "C$", unit_rate: dec!(1.36) },
    CurrencyInfo { code: "AUD", name: "Australian Dollar", symbol: "A$", unit_rate: dec!(1.53) },
    CurrencyInfo { code: "CHF", name: "Swiss Franc", symbol: "CHF", unit_rate: dec!(0.88) },
    CurrencyInfo { code: "INR", name: "Indian Rupee", symbol: "\u{20B9}", unit_rate: dec!(83.12) },
    CurrencyInfo { code: "SGD", name: "Singapore Dollar", symbol: "S$", unit_rate: dec!(1.34) },
    CurrencyInfo { code: "NGN", name: "Nigerian Naira", symbol: "\u{20A6}", unit_rate: dec!(1550.0) },
];

/// Look up the static metadata for a currency code.
pub fn currency_info(currency: &Currency) -> Option<&'static CurrencyInfo> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|info| info.code == currency.code())
}
