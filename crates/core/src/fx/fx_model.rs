use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered currency pair. A rate for the pair converts one unit of
/// `from` into `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The same pair in the opposite direction.
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

/// How a conversion rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateSource {
    /// Source and base currency are the same.
    Identity,
    /// The direct pair was quoted.
    Direct,
    /// Reciprocal of the inverse pair's quote.
    Inverse,
    /// Neither direction was quotable; the identity rate 1.0 was used.
    /// Callers requiring strict correctness treat this as a warning.
    Fallback,
}

/// A resolved conversion rate together with its provenance, so callers can
/// distinguish a real quote from the documented identity fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateResolution {
    pub rate: Decimal,
    pub source: RateSource,
}

impl RateResolution {
    /// True when the rate is the identity fallback rather than a quote.
    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Fallback
    }
}
