//! Monetary rounding rules.
//!
//! All monetary figures on the wire are rounded to two decimal places;
//! exchange rates keep six.

use rust_decimal::Decimal;

/// Decimal places for monetary amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Decimal places for exchange rates.
pub const RATE_SCALE: u32 = 6;

/// Round a monetary amount to its wire precision.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp(AMOUNT_SCALE)
}

/// Round an exchange rate to its wire precision.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp(RATE_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount(dec!(92.0000)), dec!(92.00));
        assert_eq!(round_amount(dec!(1.005)), dec!(1.00));
        assert_eq!(round_amount(dec!(1.015)), dec!(1.02));
    }

    #[test]
    fn test_round_rate_keeps_six_places() {
        assert_eq!(round_rate(dec!(0.9200004)), dec!(0.920000));
        assert_eq!(round_rate(dec!(162.5)), dec!(162.5));
    }
}
