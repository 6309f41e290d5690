use super::trades_model::{NewTrade, NewTradeRecord, Trade};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for the external trade ledger store.
///
/// The engine never owns trade persistence; the hosting service implements
/// this against its database. `list_trades` must return trades ordered
/// ascending by `(trade_date, created_at)`.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>>;
    async fn insert_trade(&self, new_trade: NewTradeRecord) -> Result<Trade>;
    async fn delete_trade(&self, user_id: &str, trade_id: &str) -> Result<Trade>;
}

/// Trait defining the contract for trade recording operations.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>>;

    /// Validates and records one trade. Rejects bad input synchronously,
    /// resolves the ticker through the market data adapter before
    /// acceptance, and returns the stored trade with its server-assigned id.
    async fn record_trade(&self, user_id: &str, input: NewTrade) -> Result<Trade>;

    async fn delete_trade(&self, user_id: &str, trade_id: &str) -> Result<Trade>;
}
