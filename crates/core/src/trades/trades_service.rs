//! Trade recording service.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;

use super::trades_model::{NewTrade, NewTradeRecord, Trade, TradeSide};
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::constants::amount_to_minor;
use crate::quotes::QuoteClientTrait;
use crate::trades::TradeError;
use crate::Result;

/// Validates and records trades against the external ledger store.
///
/// Validation happens entirely before the store is touched: a rejected
/// trade leaves the ledger unchanged. Persistence failures surface as-is;
/// retries, if any, belong to the store's own client.
pub struct TradeService {
    repository: Arc<dyn TradeRepositoryTrait>,
    quote_client: Arc<dyn QuoteClientTrait>,
}

impl TradeService {
    pub fn new(
        repository: Arc<dyn TradeRepositoryTrait>,
        quote_client: Arc<dyn QuoteClientTrait>,
    ) -> Self {
        Self {
            repository,
            quote_client,
        }
    }

    /// Validates the input fields that need no I/O.
    /// Returns the parsed side and the normalized fee.
    fn validate_input(input: &NewTrade) -> std::result::Result<(TradeSide, Decimal), TradeError> {
        if input.ticker.trim().is_empty() {
            return Err(TradeError::MissingTicker);
        }
        let side = TradeSide::from_str(&input.side)?;
        if input.quantity <= Decimal::ZERO {
            return Err(TradeError::NonPositiveQuantity);
        }
        if input.price <= Decimal::ZERO {
            return Err(TradeError::NonPositivePrice);
        }
        let fee = input.fee.unwrap_or(Decimal::ZERO);
        if fee < Decimal::ZERO {
            return Err(TradeError::NegativeFee);
        }
        Ok((side, fee))
    }
}

#[async_trait]
impl TradeServiceTrait for TradeService {
    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        self.repository.list_trades(user_id)
    }

    async fn record_trade(&self, user_id: &str, input: NewTrade) -> Result<Trade> {
        let (side, fee) = Self::validate_input(&input)?;
        let ticker = input.ticker.trim().to_uppercase();

        // The adapter decides whether the ticker is quotable; unresolvable
        // symbols are rejected before anything reaches the ledger.
        let resolved_ticker = self
            .quote_client
            .resolve_ticker(&ticker)
            .await?
            .ok_or(TradeError::UnresolvableTicker(ticker))?;

        let gross = input.quantity * input.price;
        let gross_minor = amount_to_minor(gross).ok_or(TradeError::AmountOutOfRange)?;
        let fee_minor = amount_to_minor(fee).ok_or(TradeError::AmountOutOfRange)?;
        let trade_date = input
            .trade_date
            .unwrap_or_else(|| Utc::now().date_naive());

        debug!(
            "Recording {} {} x {} (gross_minor={}, fee_minor={}) for user {}",
            side, input.quantity, resolved_ticker, gross_minor, fee_minor, user_id
        );

        let trade = self
            .repository
            .insert_trade(NewTradeRecord {
                user_id: user_id.to_string(),
                ticker: resolved_ticker,
                side,
                quantity: input.quantity,
                gross_minor,
                fee_minor,
                trade_date,
            })
            .await?;

        info!("Recorded trade {} ({} {})", trade.id, trade.side, trade.ticker);
        Ok(trade)
    }

    async fn delete_trade(&self, user_id: &str, trade_id: &str) -> Result<Trade> {
        self.repository.delete_trade(user_id, trade_id).await
    }
}
