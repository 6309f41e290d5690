//! Summary domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::portfolio::ledger::TradeSnapshot;
use folio_market_data::AssetKind;

/// A degradation that occurred while valuing the portfolio.
///
/// Missing upstream data is deliberately absorbed (price 0, conversion rate
/// 1.0) so the computation always completes; these flags surface what was
/// absorbed so callers can treat the affected figures accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataQualityIssue {
    /// No price could be resolved for an open position; it is valued at 0.
    #[serde(rename_all = "camelCase")]
    MissingPrice { ticker: String },
    /// Neither direction of a currency pair was quotable; amounts in this
    /// currency entered the totals at the identity rate.
    #[serde(rename_all = "camelCase")]
    FxFallback { currency: String },
}

/// The single-currency portfolio summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Per-currency cash balances, unconverted. Balances below the display
    /// threshold are omitted here but still count toward the totals.
    pub cash: BTreeMap<String, Decimal>,
    pub total_market_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_unrealized_pl: Decimal,
    pub total_portfolio_value: Decimal,
    pub base_currency: String,
    /// The computation's execution date, not any trade's date.
    pub as_of_date: NaiveDate,
    pub data_quality: Vec<DataQualityIssue>,
}

impl PortfolioSummary {
    /// The summary of an empty ledger.
    pub fn empty(base_currency: impl Into<String>, as_of_date: NaiveDate) -> Self {
        PortfolioSummary {
            cash: BTreeMap::new(),
            total_market_value: Decimal::ZERO,
            total_cost_basis: Decimal::ZERO,
            total_unrealized_pl: Decimal::ZERO,
            total_portfolio_value: Decimal::ZERO,
            base_currency: base_currency.into(),
            as_of_date,
            data_quality: Vec::new(),
        }
    }
}

/// One open position as presented to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub ticker: String,
    pub name: String,
    pub asset_type: AssetKind,
    pub currency: String,
    pub current_price: Decimal,
    /// Chronological snapshot after every trade of this ticker.
    pub history: Vec<TradeSnapshot>,
}

impl PositionView {
    /// Market value of the most recent snapshot; zero with no history.
    /// Positions are sorted descending by this value.
    pub fn last_market_value(&self) -> Decimal {
        self.history
            .last()
            .map(|snapshot| snapshot.market_value)
            .unwrap_or(Decimal::ZERO)
    }
}

/// The full output of one valuation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub positions: Vec<PositionView>,
    pub summary: PortfolioSummary,
}

impl PortfolioView {
    pub fn empty(base_currency: impl Into<String>, as_of_date: NaiveDate) -> Self {
        PortfolioView {
            positions: Vec::new(),
            summary: PortfolioSummary::empty(base_currency, as_of_date),
        }
    }
}
