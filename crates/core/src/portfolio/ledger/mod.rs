//! Trade ledger processor - folds trade history into running positions.

mod ledger_model;
mod ledger_processor;


pub use ledger_model::{CashLedger, Holding, LedgerOutcome, TradeSnapshot};
pub use ledger_processor::LedgerProcessor;
