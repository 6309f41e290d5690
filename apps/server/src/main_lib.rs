use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::store::MemoryTradeRepository;
use folio_core::portfolio::{PortfolioService, PortfolioServiceTrait};
use folio_core::quotes::{QuoteClient, QuoteClientTrait};
use folio_core::trades::{TradeRepositoryTrait, TradeService, TradeServiceTrait};
use folio_market_data::YahooProvider;

pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait + Send + Sync>,
    pub trade_service: Arc<dyn TradeServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = Arc::new(YahooProvider::new().await?);
    let quote_client: Arc<dyn QuoteClientTrait> = Arc::new(QuoteClient::new(provider));

    let trade_repository: Arc<dyn TradeRepositoryTrait> = Arc::new(MemoryTradeRepository::new());

    let portfolio_service = Arc::new(PortfolioService::new(
        trade_repository.clone(),
        quote_client.clone(),
        config.base_currency.clone(),
    ));
    let trade_service = Arc::new(TradeService::new(trade_repository, quote_client));

    Ok(Arc::new(AppState {
        portfolio_service,
        trade_service,
    }))
}
