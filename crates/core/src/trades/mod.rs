//! Trade ledger module - domain models, services, and traits.

mod trades_errors;
mod trades_model;
mod trades_service;
mod trades_traits;

#[cfg(test)]
mod trades_service_tests;

pub use trades_errors::TradeError;
pub use trades_model::{NewTrade, NewTradeRecord, Trade, TradeSide};
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
