//! The trade fold: ordered trades in, per-ticker state out.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::constants::{DEFAULT_TICKER_CURRENCY, SELL_QUANTITY_EPSILON};
use crate::portfolio::ledger::ledger_model::{CashLedger, Holding, LedgerOutcome, TradeSnapshot};
use crate::trades::{Trade, TradeSide};

/// Folds one user's trade history into holdings, snapshots and cash.
///
/// The fold is purely deterministic arithmetic over supplied data: no I/O
/// and no failure modes. Average-cost accounting is path-dependent, so the
/// processor orders trades by `(trade_date, created_at)` itself; the result
/// depends only on that key, never on insertion order. The fold is
/// inherently sequential - each step depends on the prior holding state.
pub struct LedgerProcessor<'a> {
    /// Last-known price per ticker. Missing tickers value at zero.
    current_prices: &'a HashMap<String, Decimal>,
    /// Settlement currency per ticker, from the instrument profiles.
    ticker_currencies: &'a HashMap<String, String>,
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(
        current_prices: &'a HashMap<String, Decimal>,
        ticker_currencies: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            current_prices,
            ticker_currencies,
        }
    }

    pub fn process(&self, trades: &[Trade]) -> LedgerOutcome {
        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by_key(|trade| trade.ordering_key());

        let mut holdings: HashMap<String, Holding> = HashMap::new();
        let mut history: HashMap<String, Vec<TradeSnapshot>> = HashMap::new();
        let mut cash = CashLedger::new();

        for trade in ordered {
            let currency = self
                .ticker_currencies
                .get(&trade.ticker)
                .cloned()
                .unwrap_or_else(|| DEFAULT_TICKER_CURRENCY.to_string());

            cash.record(trade.side, &currency, trade.gross_minor, trade.fee_minor);

            let holding = holdings
                .entry(trade.ticker.clone())
                .or_insert_with(|| Holding::new(trade.ticker.clone(), currency.clone()));
            holding.currency = currency;

            match trade.side {
                TradeSide::Buy => Self::apply_buy(holding, trade),
                TradeSide::Sell => Self::apply_sell(holding, trade),
            }

            history
                .entry(trade.ticker.clone())
                .or_default()
                .push(self.snapshot_after(trade, holding));
        }

        LedgerOutcome {
            holdings,
            history,
            cash,
        }
    }

    fn apply_buy(holding: &mut Holding, trade: &Trade) {
        holding.cost_basis_minor += Decimal::from(trade.gross_minor + trade.fee_minor);
        holding.quantity += trade.quantity;
    }

    /// Removes cost at the average cost per unit at the time of sale.
    /// Cost basis and quantity are floored at zero: an over-sell beyond the
    /// tracked position is clamped, not rejected.
    fn apply_sell(holding: &mut Holding, trade: &Trade) {
        if holding.quantity > SELL_QUANTITY_EPSILON {
            let avg_cost = holding.cost_basis_minor / holding.quantity;
            let cost_to_remove = avg_cost * trade.quantity;
            holding.cost_basis_minor =
                (holding.cost_basis_minor - cost_to_remove).max(Decimal::ZERO);
        }
        holding.quantity = (holding.quantity - trade.quantity).max(Decimal::ZERO);
    }

    fn snapshot_after(&self, trade: &Trade, holding: &Holding) -> TradeSnapshot {
        let gross = trade.gross();
        let fee = trade.fee();
        let entry_price = if trade.quantity.is_zero() {
            Decimal::ZERO
        } else {
            gross / trade.quantity
        };

        let position_quantity = holding.quantity;
        let cost_basis = holding.cost_basis();
        let avg_entry_price = holding.average_entry_price();
        let current_price = self
            .current_prices
            .get(&trade.ticker)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let market_value = position_quantity * current_price;
        let unrealized_pl = market_value - cost_basis;
        let unrealized_pl_pct = if cost_basis > Decimal::ZERO {
            unrealized_pl / cost_basis * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        TradeSnapshot {
            date: trade.trade_date,
            side: trade.side,
            quantity: trade.quantity.round_dp(8),
            entry_price: entry_price.round_dp(4),
            gross: gross.round_dp(2),
            fee: fee.round_dp(2),
            position_quantity: position_quantity.round_dp(8),
            avg_entry_price: avg_entry_price.round_dp(4),
            cost_basis: cost_basis.round_dp(2),
            current_price: current_price.round_dp(4),
            market_value: market_value.round_dp(2),
            unrealized_pl: unrealized_pl.round_dp(2),
            unrealized_pl_pct: unrealized_pl_pct.round_dp(2),
        }
    }
}
