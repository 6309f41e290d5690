//! Folio Core - Portfolio valuation engine.
//!
//! This crate turns an append-only ledger of buy/sell trades into current
//! positions, cost basis, unrealized profit/loss, multi-currency cash
//! balances and a single-currency portfolio summary. It is storage-agnostic
//! and defines traits that are implemented by the hosting service (ledger
//! store) and by the `folio-market-data` crate (price/FX lookups).

pub mod constants;
pub mod errors;
pub mod fx;
pub mod portfolio;
pub mod quotes;
pub mod trades;

// Re-export common types from the portfolio module
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
