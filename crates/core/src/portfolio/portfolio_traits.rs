use async_trait::async_trait;

use crate::portfolio::summary::PortfolioView;
use crate::Result;

/// Trait defining the contract for portfolio valuation.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Values one user's portfolio from their trade ledger.
    ///
    /// Read-only and idempotent: with no intervening trade writes and
    /// unchanged upstream quotes, two calls yield identical output.
    async fn compute_portfolio(&self, user_id: &str) -> Result<PortfolioView>;
}
