//! Portfolio summary aggregation.

mod summary_model;
mod summary_service;


pub use summary_model::{DataQualityIssue, PortfolioSummary, PortfolioView, PositionView};
pub use summary_service::SummaryAggregator;
