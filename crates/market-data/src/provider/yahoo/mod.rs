//! Yahoo Finance market data provider.
//!
//! This provider uses the Yahoo Finance API to fetch market data for:
//! - Equities/ETFs (e.g., AAPL, SHOP.TO)
//! - Cryptocurrencies (e.g., BTC-USD)
//! - Foreign exchange rates (e.g., EURUSD=X)

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use log::warn;
use reqwest::header;
use rust_decimal::Decimal;
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{AssetKind, FxRateQuote, InstrumentProfile, InstrumentQuote};
use crate::provider::MarketDataProvider;

use models::{YahooPriceData, YahooQuoteSummaryResponse};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
///
/// Latest quotes go through the chart API via the `yahoo_finance_api`
/// connector; profiles and the backup quote path use the quoteSummary
/// endpoint, which requires crumb/cookie authentication.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub async fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Check if we have a cached crumb
        {
            let guard = YAHOO_CRUMB.read().unwrap();
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        // Fetch new crumb
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let client = reqwest::Client::new();

        // Step 1: Get cookie from fc.yahoo.com
        let response = client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to get cookie: {}", e),
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: Get crumb using cookie
        let crumb = client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to get crumb: {}", e),
            })?
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read crumb: {}", e),
            })?;

        let crumb_data = CrumbData { cookie, crumb };

        // Cache it
        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = None;
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    /// Fetch latest quote using primary method (library API).
    async fn fetch_latest_quote_primary(
        &self,
        symbol: &str,
        currency_hint: Option<&str>,
    ) -> Result<InstrumentQuote, MarketDataError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let yahoo_quote = response
            .last_quote()
            .map_err(|_| MarketDataError::NoData(symbol.to_string()))?;

        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let price = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(InstrumentQuote {
            symbol: symbol.to_string(),
            price,
            currency: currency_hint.map(|c| c.to_string()),
            as_of: timestamp,
            source: PROVIDER_ID.to_string(),
        })
    }

    /// Fetch latest quote using backup method (quoteSummary API).
    ///
    /// Used when the chart endpoint has no quotes, mirroring the
    /// lastPrice-then-previousClose fallback of the upstream API.
    async fn fetch_latest_quote_backup(
        &self,
        symbol: &str,
    ) -> Result<InstrumentQuote, MarketDataError> {
        let price_data = self.fetch_quote_summary_price(symbol).await?;

        let price = price_data
            .regular_market_price
            .as_ref()
            .and_then(|p| p.raw)
            .or_else(|| {
                price_data
                    .regular_market_previous_close
                    .as_ref()
                    .and_then(|p| p.raw)
            })
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

        let timestamp = price_data
            .regular_market_time
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(InstrumentQuote {
            symbol: symbol.to_string(),
            price,
            currency: price_data.currency.clone(),
            as_of: timestamp,
            source: PROVIDER_ID.to_string(),
        })
    }

    /// Fetch the quoteSummary price module for a symbol.
    async fn fetch_quote_summary_price(
        &self,
        symbol: &str,
    ) -> Result<YahooPriceData, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("quoteSummary request failed: {}", e),
            })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Yahoo authentication expired".to_string(),
            });
        }

        let data: YahooQuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse quoteSummary response: {}", e),
            }
        })?;

        data.quote_summary
            .result
            .into_iter()
            .next()
            .and_then(|r| r.price)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(
        &self,
        symbol: &str,
        currency_hint: Option<&str>,
    ) -> Result<InstrumentQuote, MarketDataError> {
        match self.fetch_latest_quote_primary(symbol, currency_hint).await {
            Ok(quote) => Ok(quote),
            Err(e) if e.is_not_found() => {
                warn!(
                    "Chart endpoint had no quotes for {}, trying quoteSummary: {}",
                    symbol, e
                );
                self.fetch_latest_quote_backup(symbol).await
            }
            Err(e) => Err(e),
        }
    }

    async fn get_profile(&self, symbol: &str) -> Result<InstrumentProfile, MarketDataError> {
        let price_data = self.fetch_quote_summary_price(symbol).await?;

        let name = price_data
            .long_name
            .clone()
            .or_else(|| price_data.short_name.clone());
        let kind = price_data
            .quote_type
            .as_deref()
            .map(AssetKind::from_quote_type)
            .unwrap_or_default();

        Ok(InstrumentProfile {
            symbol: symbol.to_string(),
            name,
            kind,
            currency: price_data.currency,
        })
    }

    async fn get_fx_rate(&self, from: &str, to: &str) -> Result<FxRateQuote, MarketDataError> {
        let symbol = format!("{}{}=X", from, to);
        let quote = self.get_latest_quote(&symbol, None).await?;

        if quote.price <= Decimal::ZERO {
            return Err(MarketDataError::NoData(symbol));
        }

        Ok(FxRateQuote {
            from: from.to_string(),
            to: to.to_string(),
            rate: quote.price,
            as_of: quote.as_of,
            source: PROVIDER_ID.to_string(),
        })
    }
}
