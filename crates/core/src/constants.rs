//! Engine-wide constants and fixed-point helpers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places used by fixed-point minor-unit amounts (divisor 10^4).
pub const MINOR_UNIT_SCALE: u32 = 4;

/// Default base currency for portfolio summaries.
pub const DEFAULT_BASE_CURRENCY: &str = "EUR";

/// Currency assumed for tickers whose profile reports none.
pub const DEFAULT_TICKER_CURRENCY: &str = "USD";

/// Quantity below which a holding is no longer an open position.
pub const OPEN_POSITION_THRESHOLD: Decimal = dec!(0.001);

/// Guard against average-cost division on dust left by rounding.
pub const SELL_QUANTITY_EPSILON: Decimal = dec!(0.000000001);

/// Cash balances smaller than this are omitted from the per-currency map.
pub const CASH_DISPLAY_THRESHOLD: Decimal = dec!(0.01);

/// Converts a minor-unit integer amount to display units. Exact.
pub fn minor_to_amount(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}

/// Converts a display-unit amount to minor units, rounding to the nearest
/// integer. Returns `None` when the amount overflows `i64`.
pub fn amount_to_minor(amount: Decimal) -> Option<i64> {
    (amount * dec!(10000)).round().to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_to_amount_is_exact() {
        assert_eq!(minor_to_amount(10_000), dec!(1));
        assert_eq!(minor_to_amount(12_345), dec!(1.2345));
        assert_eq!(minor_to_amount(-500), dec!(-0.05));
        assert_eq!(minor_to_amount(0), dec!(0));
    }

    #[test]
    fn test_amount_to_minor_rounds() {
        assert_eq!(amount_to_minor(dec!(1)), Some(10_000));
        assert_eq!(amount_to_minor(dec!(150.5)), Some(1_505_000));
        // sub-minor residue rounds to nearest
        assert_eq!(amount_to_minor(dec!(0.00004)), Some(0));
        assert_eq!(amount_to_minor(dec!(0.00006)), Some(1));
    }

    #[test]
    fn test_round_trip() {
        let minor = 1_234_567_i64;
        assert_eq!(amount_to_minor(minor_to_amount(minor)), Some(minor));
    }
}
