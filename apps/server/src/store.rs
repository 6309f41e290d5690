//! In-memory trade ledger store.
//!
//! Backs the standalone server binary. A production deployment substitutes
//! the real ledger store behind the same `TradeRepositoryTrait` seam.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use folio_core::errors::{Error, StoreError};
use folio_core::trades::{NewTradeRecord, Trade, TradeRepositoryTrait};
use folio_core::Result;

#[derive(Default)]
pub struct MemoryTradeRepository {
    trades: RwLock<Vec<Trade>>,
}

impl MemoryTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeRepositoryTrait for MemoryTradeRepository {
    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        let mut trades: Vec<Trade> = self
            .trades
            .read()
            .map_err(|e| Error::Store(StoreError::QueryFailed(e.to_string())))?
            .iter()
            .filter(|trade| trade.user_id == user_id)
            .cloned()
            .collect();
        trades.sort_by_key(|trade| trade.ordering_key());
        Ok(trades)
    }

    async fn insert_trade(&self, new_trade: NewTradeRecord) -> Result<Trade> {
        let trade = Trade {
            id: Uuid::new_v4().to_string(),
            user_id: new_trade.user_id,
            ticker: new_trade.ticker,
            side: new_trade.side,
            quantity: new_trade.quantity,
            gross_minor: new_trade.gross_minor,
            fee_minor: new_trade.fee_minor,
            trade_date: new_trade.trade_date,
            created_at: Utc::now(),
        };
        self.trades
            .write()
            .map_err(|e| Error::Store(StoreError::QueryFailed(e.to_string())))?
            .push(trade.clone());
        Ok(trade)
    }

    async fn delete_trade(&self, user_id: &str, trade_id: &str) -> Result<Trade> {
        let mut trades = self
            .trades
            .write()
            .map_err(|e| Error::Store(StoreError::QueryFailed(e.to_string())))?;
        let index = trades
            .iter()
            .position(|trade| trade.user_id == user_id && trade.id == trade_id)
            .ok_or_else(|| Error::Store(StoreError::NotFound(trade_id.to_string())))?;
        Ok(trades.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_core::trades::TradeSide;
    use rust_decimal_macros::dec;

    fn record(ticker: &str, day: u32) -> NewTradeRecord {
        NewTradeRecord {
            user_id: "user-1".to_string(),
            ticker: ticker.to_string(),
            side: TradeSide::Buy,
            quantity: dec!(1),
            gross_minor: 1_000_000,
            fee_minor: 0,
            trade_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_list_orders_by_date() {
        let repository = MemoryTradeRepository::new();
        // inserted out of date order
        let later = repository.insert_trade(record("AAPL", 20)).await.unwrap();
        let earlier = repository.insert_trade(record("MSFT", 10)).await.unwrap();
        assert_ne!(later.id, earlier.id);

        let trades = repository.list_trades("user-1").unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ticker, "MSFT");
        assert_eq!(trades[1].ticker, "AAPL");
    }

    #[tokio::test]
    async fn test_list_is_scoped_per_user() {
        let repository = MemoryTradeRepository::new();
        repository.insert_trade(record("AAPL", 1)).await.unwrap();
        assert!(repository.list_trades("someone-else").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_matching_user() {
        let repository = MemoryTradeRepository::new();
        let trade = repository.insert_trade(record("AAPL", 1)).await.unwrap();

        let err = repository
            .delete_trade("someone-else", &trade.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::NotFound(_))));

        repository.delete_trade("user-1", &trade.id).await.unwrap();
        assert!(repository.list_trades("user-1").unwrap().is_empty());
    }
}
