//! Trade domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::minor_to_amount;
use crate::trades::TradeError;

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl FromStr for TradeSide {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            other => Err(TradeError::InvalidSide(other.to_string())),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only trade ledger.
///
/// Monetary amounts are stored as fixed-point minor units (`i64`, divisor
/// 10^4) so long trade histories never accumulate binary floating-point
/// drift. Immutable once recorded: the engine only ever reads trades.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    /// Normalized uppercase ticker symbol.
    pub ticker: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub quantity: Decimal,
    /// Gross amount (quantity x price) in minor units.
    pub gross_minor: i64,
    /// Fee in minor units.
    pub fee_minor: i64,
    pub trade_date: NaiveDate,
    /// Tie-breaker for same-date ordering.
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Gross amount in display units.
    pub fn gross(&self) -> Decimal {
        minor_to_amount(self.gross_minor)
    }

    /// Fee in display units.
    pub fn fee(&self) -> Decimal {
        minor_to_amount(self.fee_minor)
    }

    /// The chronological ordering key. Average-cost accounting is
    /// path-dependent, so folds must process trades in this order.
    pub fn ordering_key(&self) -> (NaiveDate, DateTime<Utc>) {
        (self.trade_date, self.created_at)
    }
}

/// Caller-supplied input for recording a new trade. Amounts arrive in
/// display units; the service converts to minor units after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub ticker: String,
    #[serde(rename = "type")]
    pub side: String,
    pub quantity: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub trade_date: Option<NaiveDate>,
}

/// A validated trade ready for insertion. The ledger store assigns the id
/// and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewTradeRecord {
    pub user_id: String,
    pub ticker: String,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub gross_minor: i64,
    pub fee_minor: i64,
    pub trade_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_side_from_str() {
        assert_eq!(TradeSide::from_str("buy").unwrap(), TradeSide::Buy);
        assert_eq!(TradeSide::from_str("SELL").unwrap(), TradeSide::Sell);
        assert!(matches!(
            TradeSide::from_str("short"),
            Err(TradeError::InvalidSide(_))
        ));
    }

    #[test]
    fn test_trade_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TradeSide::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&TradeSide::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_gross_and_fee_display_units() {
        let trade = Trade {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            ticker: "AAPL".to_string(),
            side: TradeSide::Buy,
            quantity: dec!(10),
            gross_minor: 15_000_000,
            fee_minor: 9_900,
            trade_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created_at: Utc::now(),
        };
        assert_eq!(trade.gross(), dec!(1500));
        assert_eq!(trade.fee(), dec!(0.99));
    }
}
