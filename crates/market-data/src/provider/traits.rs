//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{FxRateQuote, InstrumentProfile, InstrumentQuote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// Every method is a single-symbol lookup; batching and concurrency are the
/// caller's concern, so a slow or missing symbol never poisons a batch.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and for
    /// the `source` field on returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest traded price for a symbol.
    ///
    /// `currency_hint` labels the returned quote when the provider's fast
    /// path does not report a currency itself; it never affects the price.
    async fn get_latest_quote(
        &self,
        symbol: &str,
        currency_hint: Option<&str>,
    ) -> Result<InstrumentQuote, MarketDataError>;

    /// Fetch presentation metadata (name, classification, trading currency)
    /// for a symbol.
    async fn get_profile(&self, symbol: &str) -> Result<InstrumentProfile, MarketDataError>;

    /// Fetch the latest exchange rate for a currency pair.
    async fn get_fx_rate(&self, from: &str, to: &str) -> Result<FxRateQuote, MarketDataError>;
}
