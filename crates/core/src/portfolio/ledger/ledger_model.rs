//! Ledger fold domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::constants::{minor_to_amount, OPEN_POSITION_THRESHOLD};
use crate::trades::TradeSide;

/// Per-ticker running state derived by folding trades in chronological
/// order.
///
/// Cost basis follows average-cost accounting: a sell removes cost
/// proportional to the average cost per unit at the time of sale. Quantity
/// and cost basis are floored at zero; an over-sell beyond the tracked
/// quantity is accepted and clamped, never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub quantity: Decimal,
    /// Cost basis in minor units. Fractional minor units accumulate from
    /// proportional sell removals and are kept exact.
    pub cost_basis_minor: Decimal,
    /// Settlement currency, assumed stable per ticker.
    pub currency: String,
}

impl Holding {
    /// The explicit zero-value state for a ticker's first trade.
    pub fn new(ticker: impl Into<String>, currency: impl Into<String>) -> Self {
        Holding {
            ticker: ticker.into(),
            quantity: Decimal::ZERO,
            cost_basis_minor: Decimal::ZERO,
            currency: currency.into(),
        }
    }

    /// Cost basis in display units.
    pub fn cost_basis(&self) -> Decimal {
        self.cost_basis_minor / Decimal::from(10_000)
    }

    /// Average entry price per unit, or zero for an empty position.
    pub fn average_entry_price(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.cost_basis() / self.quantity
        } else {
            Decimal::ZERO
        }
    }

    /// Whether the position is large enough to count as open.
    pub fn is_open(&self) -> bool {
        self.quantity > OPEN_POSITION_THRESHOLD
    }
}

/// Immutable record of a holding's state immediately after one trade.
/// Values are display units, rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSnapshot {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub quantity: Decimal,
    pub entry_price: Decimal,
    pub gross: Decimal,
    pub fee: Decimal,
    pub position_quantity: Decimal,
    pub avg_entry_price: Decimal,
    pub cost_basis: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_pl: Decimal,
    pub unrealized_pl_pct: Decimal,
}

/// Signed cash balances per currency, in minor units. Independent of any
/// ticker: buys spend `gross + fee`, sells return `gross - fee`.
#[derive(Debug, Clone, Default)]
pub struct CashLedger {
    balances_minor: HashMap<String, i64>,
}

impl CashLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books the cash impact of one trade in its settlement currency.
    pub fn record(&mut self, side: TradeSide, currency: &str, gross_minor: i64, fee_minor: i64) {
        let delta = match side {
            TradeSide::Buy => -(gross_minor + fee_minor),
            TradeSide::Sell => gross_minor - fee_minor,
        };
        *self.balances_minor.entry(currency.to_string()).or_insert(0) += delta;
    }

    pub fn balance_minor(&self, currency: &str) -> i64 {
        self.balances_minor.get(currency).copied().unwrap_or(0)
    }

    /// Balances in display units.
    pub fn balances(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.balances_minor
            .iter()
            .map(|(currency, minor)| (currency.as_str(), minor_to_amount(*minor)))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.balances_minor.keys().map(|c| c.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.balances_minor.is_empty()
    }
}

/// Result of one ledger fold: final holdings, the ordered snapshot history
/// per ticker, and the cash ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerOutcome {
    pub holdings: HashMap<String, Holding>,
    pub history: HashMap<String, Vec<TradeSnapshot>>,
    pub cash: CashLedger,
}

impl LedgerOutcome {
    /// Holdings whose quantity exceeds the open-position threshold.
    /// Closed tickers keep their snapshot history.
    pub fn open_holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values().filter(|h| h.is_open())
    }

    /// Every currency touched by holdings or cash, open or not.
    pub fn currencies_in_use(&self) -> HashSet<String> {
        self.holdings
            .values()
            .map(|h| h.currency.clone())
            .chain(self.cash.currencies().map(|c| c.to_string()))
            .collect()
    }
}
