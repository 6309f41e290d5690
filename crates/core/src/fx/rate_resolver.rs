use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::fx::fx_model::{CurrencyPair, RateResolution, RateSource};

/// Resolves conversion rates into one base currency from a set of pair
/// quotes fetched for the current valuation run.
///
/// Resolution order for a source currency:
/// 1. source == base: identity.
/// 2. Direct quote `source/base`, if present and positive.
/// 3. Reciprocal of the inverse quote `base/source`, if present and positive.
/// 4. Identity rate 1.0 - a documented degradation, not an error. It keeps
///    the summary computable when a pair is unquotable, at the cost of
///    misstating value for that currency, so the resolution carries its
///    provenance and callers surface fallbacks as data-quality warnings.
///
/// The function is total over any two currency codes.
pub struct RateResolver {
    base_currency: String,
    rates: HashMap<CurrencyPair, Decimal>,
}

impl RateResolver {
    /// Builds a resolver from per-pair quotes. Pairs that resolved to no
    /// data (`None`) are simply absent and fall through the chain.
    pub fn new(
        base_currency: impl Into<String>,
        quotes: HashMap<CurrencyPair, Option<Decimal>>,
    ) -> Self {
        let rates = quotes
            .into_iter()
            .filter_map(|(pair, rate)| rate.map(|r| (pair, r)))
            .collect();
        Self {
            base_currency: base_currency.into(),
            rates,
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Resolves the multiplicative rate converting `from` into the base
    /// currency.
    pub fn resolve(&self, from: &str) -> RateResolution {
        if from == self.base_currency {
            return RateResolution {
                rate: Decimal::ONE,
                source: RateSource::Identity,
            };
        }

        let direct = CurrencyPair::new(from, self.base_currency.as_str());
        if let Some(rate) = self.rates.get(&direct) {
            if *rate > Decimal::ZERO {
                return RateResolution {
                    rate: *rate,
                    source: RateSource::Direct,
                };
            }
        }

        if let Some(rate) = self.rates.get(&direct.inverse()) {
            if *rate > Decimal::ZERO {
                return RateResolution {
                    rate: Decimal::ONE / *rate,
                    source: RateSource::Inverse,
                };
            }
        }

        RateResolution {
            rate: Decimal::ONE,
            source: RateSource::Fallback,
        }
    }

    /// Converts an amount from `from` into the base currency.
    pub fn convert(&self, amount: Decimal, from: &str) -> (Decimal, RateResolution) {
        let resolution = self.resolve(from);
        (amount * resolution.rate, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn resolver(quotes: Vec<(&str, &str, Decimal)>) -> RateResolver {
        let map = quotes
            .into_iter()
            .map(|(from, to, rate)| (CurrencyPair::new(from, to), Some(rate)))
            .collect();
        RateResolver::new("EUR", map)
    }

    #[test]
    fn test_identity_for_base_currency() {
        let resolver = resolver(vec![]);
        let resolution = resolver.resolve("EUR");
        assert_eq!(resolution.rate, Decimal::ONE);
        assert_eq!(resolution.source, RateSource::Identity);
    }

    #[test]
    fn test_direct_quote_wins() {
        let resolver = resolver(vec![
            ("USD", "EUR", dec!(0.92)),
            ("EUR", "USD", dec!(1.09)),
        ]);
        let resolution = resolver.resolve("USD");
        assert_eq!(resolution.rate, dec!(0.92));
        assert_eq!(resolution.source, RateSource::Direct);
    }

    #[test]
    fn test_inverse_reciprocal_when_no_direct() {
        let resolver = resolver(vec![("EUR", "GBP", dec!(0.8))]);
        let resolution = resolver.resolve("GBP");
        assert_eq!(resolution.rate, Decimal::ONE / dec!(0.8));
        assert_eq!(resolution.source, RateSource::Inverse);
    }

    #[test]
    fn test_fallback_to_identity_when_unquotable() {
        let resolver = resolver(vec![]);
        let resolution = resolver.resolve("CHF");
        assert_eq!(resolution.rate, Decimal::ONE);
        assert_eq!(resolution.source, RateSource::Fallback);
        assert!(resolution.is_fallback());
    }

    #[test]
    fn test_zero_rates_are_skipped() {
        // A zero direct quote must not be used, and a zero inverse quote
        // must not be inverted; both fall through.
        let resolver = resolver(vec![
            ("USD", "EUR", dec!(0)),
            ("EUR", "USD", dec!(0)),
        ]);
        let resolution = resolver.resolve("USD");
        assert_eq!(resolution.rate, Decimal::ONE);
        assert_eq!(resolution.source, RateSource::Fallback);
    }

    #[test]
    fn test_convert_applies_rate() {
        let resolver = resolver(vec![("USD", "EUR", dec!(0.9))]);
        let (converted, resolution) = resolver.convert(dec!(100), "USD");
        assert_eq!(converted, dec!(90));
        assert!(!resolution.is_fallback());
    }
}
