//! Combines open positions and cash into one base-currency summary.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::constants::CASH_DISPLAY_THRESHOLD;
use crate::fx::RateResolver;
use crate::portfolio::ledger::LedgerOutcome;
use crate::portfolio::summary::summary_model::{
    DataQualityIssue, PortfolioSummary, PortfolioView, PositionView,
};
use folio_market_data::{AssetKind, InstrumentProfile};

/// Aggregates a ledger fold's outcome into a [`PortfolioView`].
///
/// Never raises on missing data: unquoted tickers value at zero, unquotable
/// currencies convert at the identity rate, and both degradations are
/// reported through the summary's data-quality flags.
pub struct SummaryAggregator {
    base_currency: String,
}

impl SummaryAggregator {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
        }
    }

    pub fn aggregate(
        &self,
        outcome: LedgerOutcome,
        prices: &HashMap<String, Decimal>,
        missing_prices: &HashSet<String>,
        profiles: &HashMap<String, Option<InstrumentProfile>>,
        resolver: &RateResolver,
        as_of_date: NaiveDate,
    ) -> PortfolioView {
        let LedgerOutcome {
            holdings,
            mut history,
            cash,
        } = outcome;

        let mut total_market_base = Decimal::ZERO;
        let mut total_cost_base = Decimal::ZERO;
        let mut total_cash_base = Decimal::ZERO;
        let mut fallback_currencies: BTreeSet<String> = BTreeSet::new();
        let mut flagged_tickers: BTreeSet<String> = BTreeSet::new();
        let mut positions = Vec::new();

        for holding in holdings.values().filter(|h| h.is_open()) {
            let price = prices
                .get(&holding.ticker)
                .copied()
                .unwrap_or(Decimal::ZERO);
            if missing_prices.contains(&holding.ticker) {
                flagged_tickers.insert(holding.ticker.clone());
            }

            let market_value = holding.quantity * price;
            let resolution = resolver.resolve(&holding.currency);
            if resolution.is_fallback() {
                warn!(
                    "No FX quote for {} -> {}. Converting at identity rate.",
                    holding.currency, self.base_currency
                );
                fallback_currencies.insert(holding.currency.clone());
            }
            total_market_base += market_value * resolution.rate;
            total_cost_base += holding.cost_basis() * resolution.rate;

            let profile = profiles.get(&holding.ticker).and_then(|p| p.as_ref());
            positions.push(PositionView {
                ticker: holding.ticker.clone(),
                name: display_name(&holding.ticker, profile),
                asset_type: profile.map(|p| p.kind).unwrap_or(AssetKind::Stock),
                currency: holding.currency.clone(),
                current_price: price.round_dp(4),
                history: history.remove(&holding.ticker).unwrap_or_default(),
            });
        }

        let mut cash_display: BTreeMap<String, Decimal> = BTreeMap::new();
        for (currency, amount) in cash.balances() {
            let resolution = resolver.resolve(currency);
            if resolution.is_fallback() {
                warn!(
                    "No FX quote for {} -> {}. Converting cash at identity rate.",
                    currency, self.base_currency
                );
                fallback_currencies.insert(currency.to_string());
            }
            // Converted value counts toward the total even when the balance
            // is below the display threshold.
            total_cash_base += amount * resolution.rate;
            if amount.abs() >= CASH_DISPLAY_THRESHOLD {
                cash_display.insert(currency.to_string(), amount.round_dp(2));
            }
        }

        positions.sort_by(|a, b| b.last_market_value().cmp(&a.last_market_value()));

        let mut data_quality: Vec<DataQualityIssue> = flagged_tickers
            .into_iter()
            .map(|ticker| DataQualityIssue::MissingPrice { ticker })
            .collect();
        data_quality.extend(
            fallback_currencies
                .into_iter()
                .map(|currency| DataQualityIssue::FxFallback { currency }),
        );

        let summary = PortfolioSummary {
            cash: cash_display,
            total_market_value: total_market_base.round_dp(2),
            total_cost_basis: total_cost_base.round_dp(2),
            total_unrealized_pl: (total_market_base - total_cost_base).round_dp(2),
            total_portfolio_value: (total_market_base + total_cash_base).round_dp(2),
            base_currency: self.base_currency.clone(),
            as_of_date,
            data_quality,
        };

        PortfolioView { positions, summary }
    }
}

/// Profile name, falling back to the ticker with any pair suffix stripped
/// (BTC-USD displays as BTC).
fn display_name(ticker: &str, profile: Option<&InstrumentProfile>) -> String {
    profile
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| ticker.split('-').next().unwrap_or(ticker).to_string())
}
