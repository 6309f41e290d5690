//! Core error types for the valuation engine.
//!
//! This module defines storage-agnostic error types. Ledger-store-specific
//! errors are converted to these types by the hosting service.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::trades::TradeError;
use folio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
///
/// Ledger-store-specific errors are wrapped in string form to keep this
/// type storage-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ledger store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Trade error: {0}")]
    Trade(#[from] TradeError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for ledger store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to reach the ledger store.
    #[error("Failed to connect to ledger store: {0}")]
    ConnectionFailed(String),

    /// A ledger query failed to execute.
    #[error("Ledger query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
