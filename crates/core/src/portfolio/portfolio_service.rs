//! Orchestrates one valuation run.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::DEFAULT_TICKER_CURRENCY;
use crate::fx::{CurrencyPair, RateResolver};
use crate::portfolio::ledger::LedgerProcessor;
use crate::portfolio::summary::{PortfolioView, SummaryAggregator};
use crate::portfolio::PortfolioServiceTrait;
use crate::quotes::QuoteClientTrait;
use crate::trades::TradeRepositoryTrait;
use crate::Result;

/// Computes the portfolio view for one user.
///
/// Each run is independent: trades are read once, the adapter is consulted
/// once per distinct ticker and currency pair, and nothing is persisted.
/// The adapter's responses are fully consumed before aggregation - the fold
/// itself never suspends.
pub struct PortfolioService {
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    quote_client: Arc<dyn QuoteClientTrait>,
    base_currency: String,
}

impl PortfolioService {
    pub fn new(
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        quote_client: Arc<dyn QuoteClientTrait>,
        base_currency: impl Into<String>,
    ) -> Self {
        Self {
            trade_repository,
            quote_client,
            base_currency: base_currency.into(),
        }
    }

    /// The currency pairs worth quoting for a run: both directions between
    /// the base currency and every other currency in use, so the resolver
    /// can fall back to the reciprocal when only one direction trades.
    fn fx_pairs_for(&self, currencies: &HashSet<String>) -> HashSet<CurrencyPair> {
        let mut pairs = HashSet::new();
        for currency in currencies {
            if currency != &self.base_currency {
                pairs.insert(CurrencyPair::new(currency.clone(), self.base_currency.clone()));
                pairs.insert(CurrencyPair::new(self.base_currency.clone(), currency.clone()));
            }
        }
        pairs
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn compute_portfolio(&self, user_id: &str) -> Result<PortfolioView> {
        let trades = self.trade_repository.list_trades(user_id)?;
        // Wall-clock date of the computation, not any trade's date.
        let as_of_date = Utc::now().date_naive();

        if trades.is_empty() {
            return Ok(PortfolioView::empty(self.base_currency.clone(), as_of_date));
        }

        let tickers: HashSet<String> = trades.iter().map(|t| t.ticker.clone()).collect();
        debug!(
            "Valuing portfolio for user {}: {} trades across {} tickers",
            user_id,
            trades.len(),
            tickers.len()
        );

        // Batched, concurrent adapter lookups; the fold below is pure.
        let profiles = self.quote_client.quote_profiles(&tickers).await;
        let quotes = self.quote_client.quote_prices(&tickers).await;

        let ticker_currencies: HashMap<String, String> = tickers
            .iter()
            .map(|ticker| {
                let currency = profiles
                    .get(ticker)
                    .and_then(|p| p.as_ref())
                    .and_then(|p| p.currency.clone())
                    .unwrap_or_else(|| DEFAULT_TICKER_CURRENCY.to_string());
                (ticker.clone(), currency)
            })
            .collect();

        let mut prices: HashMap<String, Decimal> = HashMap::new();
        let mut missing_prices: HashSet<String> = HashSet::new();
        for ticker in &tickers {
            match quotes.get(ticker).and_then(|q| q.as_ref()) {
                Some(quote) => {
                    prices.insert(ticker.clone(), quote.price);
                }
                None => {
                    prices.insert(ticker.clone(), Decimal::ZERO);
                    missing_prices.insert(ticker.clone());
                }
            }
        }

        let outcome = LedgerProcessor::new(&prices, &ticker_currencies).process(&trades);

        let pairs = self.fx_pairs_for(&outcome.currencies_in_use());
        let fx_quotes = if pairs.is_empty() {
            HashMap::new()
        } else {
            self.quote_client.quote_fx(&pairs).await
        };
        let resolver = RateResolver::new(self.base_currency.clone(), fx_quotes);

        let aggregator = SummaryAggregator::new(self.base_currency.clone());
        Ok(aggregator.aggregate(
            outcome,
            &prices,
            &missing_prices,
            &profiles,
            &resolver,
            as_of_date,
        ))
    }
}
