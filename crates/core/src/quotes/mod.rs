//! Quote lookup module.
//!
//! The engine consults the market data adapter through [`QuoteClient`], a
//! facade that batches the per-symbol provider lookups of one valuation run
//! and tolerates partial failure: a symbol the provider cannot resolve is
//! reported as `None`, never as an error for the whole batch.

mod quote_client;


pub use quote_client::{QuoteClient, QuoteClientTrait};
