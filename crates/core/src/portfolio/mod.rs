//! Portfolio valuation module.
//!
//! The valuation pipeline runs in three stages:
//!
//! 1. [`ledger`] - folds the ordered trade history into per-ticker holdings,
//!    per-trade snapshots and the multi-currency cash ledger (pure, no I/O)
//! 2. [`crate::fx`] - resolves conversion rates into the base currency
//! 3. [`summary`] - combines open positions and cash into one summary
//!
//! [`PortfolioService`] orchestrates the stages around the batched market
//! data lookups. Each run is a pure, stateless function of its inputs; no
//! computed state is persisted.

pub mod ledger;
pub mod summary;

mod portfolio_service;
mod portfolio_traits;

pub use portfolio_service::PortfolioService;
pub use portfolio_traits::PortfolioServiceTrait;
