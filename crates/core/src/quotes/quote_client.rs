use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::warn;
use rust_decimal::Decimal;

use crate::fx::CurrencyPair;
use crate::Result;
use folio_market_data::{InstrumentProfile, InstrumentQuote, MarketDataProvider};

/// Engine-facing contract for batched price/FX lookups.
///
/// One valuation run queries the adapter once per distinct ticker and
/// currency pair. Missing data maps to `None`; only the resolvability probe
/// can fail outright (a transport error there means a trade cannot be
/// validated at all).
#[async_trait]
pub trait QuoteClientTrait: Send + Sync {
    async fn quote_prices(
        &self,
        tickers: &HashSet<String>,
    ) -> HashMap<String, Option<InstrumentQuote>>;

    async fn quote_profiles(
        &self,
        tickers: &HashSet<String>,
    ) -> HashMap<String, Option<InstrumentProfile>>;

    async fn quote_fx(
        &self,
        pairs: &HashSet<CurrencyPair>,
    ) -> HashMap<CurrencyPair, Option<Decimal>>;

    /// Probes whether a ticker is quotable, retrying the `-USD` crypto
    /// variant before giving up. Returns the canonical symbol on success.
    async fn resolve_ticker(&self, ticker: &str) -> Result<Option<String>>;
}

/// Facade over a [`MarketDataProvider`] that issues the independent
/// per-symbol lookups of one run concurrently.
pub struct QuoteClient {
    provider: Arc<dyn MarketDataProvider>,
}

impl QuoteClient {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl QuoteClientTrait for QuoteClient {
    async fn quote_prices(
        &self,
        tickers: &HashSet<String>,
    ) -> HashMap<String, Option<InstrumentQuote>> {
        let lookups = tickers.iter().map(|ticker| async move {
            let quote = match self.provider.get_latest_quote(ticker, None).await {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("No price for {}: {}. Valuing at 0.", ticker, e);
                    None
                }
            };
            (ticker.clone(), quote)
        });
        join_all(lookups).await.into_iter().collect()
    }

    async fn quote_profiles(
        &self,
        tickers: &HashSet<String>,
    ) -> HashMap<String, Option<InstrumentProfile>> {
        let lookups = tickers.iter().map(|ticker| async move {
            let profile = match self.provider.get_profile(ticker).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!("No profile for {}: {}", ticker, e);
                    None
                }
            };
            (ticker.clone(), profile)
        });
        join_all(lookups).await.into_iter().collect()
    }

    async fn quote_fx(
        &self,
        pairs: &HashSet<CurrencyPair>,
    ) -> HashMap<CurrencyPair, Option<Decimal>> {
        let lookups = pairs.iter().map(|pair| async move {
            let rate = match self.provider.get_fx_rate(&pair.from, &pair.to).await {
                Ok(quote) => Some(quote.rate),
                Err(e) => {
                    warn!("No FX rate for {}: {}", pair, e);
                    None
                }
            };
            (pair.clone(), rate)
        });
        join_all(lookups).await.into_iter().collect()
    }

    async fn resolve_ticker(&self, ticker: &str) -> Result<Option<String>> {
        match self.provider.get_latest_quote(ticker, None).await {
            Ok(quote) if quote.price > Decimal::ZERO => return Ok(Some(ticker.to_string())),
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        // Bare crypto symbols (e.g. BTC) are quoted against USD upstream.
        let crypto_ticker = format!("{}-USD", ticker);
        match self.provider.get_latest_quote(&crypto_ticker, None).await {
            Ok(quote) if quote.price > Decimal::ZERO => Ok(Some(crypto_ticker)),
            Ok(_) => Ok(None),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
