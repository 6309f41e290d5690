//! Market data domain models.
//!
//! These are the provider-agnostic shapes consumers work with: a latest
//! price per symbol, a latest rate per currency pair, and presentation
//! metadata per instrument.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Asset classification
// =============================================================================

/// Coarse classification of an instrument, used for presentation only.
///
/// Valuation never branches on this; it exists so callers can label a
/// position as a stock, an ETF or a cryptocurrency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Stock,
    Etf,
    Cryptocurrency,
}

impl AssetKind {
    /// Maps a provider `quoteType` string ("EQUITY", "ETF", "CRYPTOCURRENCY")
    /// to a classification. Anything unrecognized is treated as a stock.
    pub fn from_quote_type(quote_type: &str) -> Self {
        match quote_type.to_uppercase().as_str() {
            "CRYPTOCURRENCY" => AssetKind::Cryptocurrency,
            "ETF" => AssetKind::Etf,
            _ => AssetKind::Stock,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "stock",
            AssetKind::Etf => "etf",
            AssetKind::Cryptocurrency => "cryptocurrency",
        }
    }
}

// =============================================================================
// Quotes
// =============================================================================

/// Latest traded price for a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentQuote {
    pub symbol: String,
    pub price: Decimal,
    /// Trading currency as reported by the provider, when known.
    pub currency: Option<String>,
    pub as_of: DateTime<Utc>,
    pub source: String,
}

/// Latest rate for a currency pair. A rate of `r` means one unit of `from`
/// buys `r` units of `to`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRateQuote {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub as_of: DateTime<Utc>,
    pub source: String,
}

// =============================================================================
// Profile
// =============================================================================

/// Presentation metadata for an instrument.
///
/// Used to label positions (name, classification) and to learn the trading
/// currency of a ticker. Never feeds accounting arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentProfile {
    pub symbol: String,
    pub name: Option<String>,
    pub kind: AssetKind,
    /// Trading currency, when the provider reports one.
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_from_quote_type() {
        assert_eq!(
            AssetKind::from_quote_type("CRYPTOCURRENCY"),
            AssetKind::Cryptocurrency
        );
        assert_eq!(AssetKind::from_quote_type("ETF"), AssetKind::Etf);
        assert_eq!(AssetKind::from_quote_type("etf"), AssetKind::Etf);
        assert_eq!(AssetKind::from_quote_type("EQUITY"), AssetKind::Stock);
        assert_eq!(AssetKind::from_quote_type("MUTUALFUND"), AssetKind::Stock);
    }

    #[test]
    fn test_asset_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AssetKind::Cryptocurrency).unwrap(),
            "\"cryptocurrency\""
        );
        assert_eq!(serde_json::to_string(&AssetKind::Stock).unwrap(), "\"stock\"");
    }
}
