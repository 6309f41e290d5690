//! Folio Market Data Crate
//!
//! This crate provides provider-agnostic price and FX rate fetching for the
//! Folio valuation engine.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Latest traded prices for equities, ETFs and cryptocurrencies
//! - Latest FX rates for currency pairs
//! - Instrument profiles (display name, classification, trading currency)
//!
//! # Core Types
//!
//! - [`InstrumentQuote`] - Latest price for a single symbol
//! - [`InstrumentProfile`] - Presentation metadata for a symbol
//! - [`FxRateQuote`] - Latest rate for a currency pair
//! - [`AssetKind`] - Classification of instrument types
//!
//! Every lookup is fallible per symbol: a consumer valuing a whole portfolio
//! must be able to carry on when some symbols resolve and others do not, so
//! errors here describe a single failed lookup, never a batch.

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{AssetKind, FxRateQuote, InstrumentProfile, InstrumentQuote};

// Re-export provider types
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;

// Re-export error types
pub use errors::MarketDataError;
