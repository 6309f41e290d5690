use thiserror::Error;

/// Errors raised when validating or recording a trade.
///
/// Every variant is a synchronous rejection: nothing is written to the
/// ledger store when one of these is returned.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("ticker is required")]
    MissingTicker,

    #[error("type must be 'buy' or 'sell', got '{0}'")]
    InvalidSide(String),

    #[error("quantity must be > 0")]
    NonPositiveQuantity,

    #[error("price must be > 0")]
    NonPositivePrice,

    #[error("fee must be >= 0")]
    NegativeFee,

    #[error("amount out of range for minor-unit representation")]
    AmountOutOfRange,

    #[error("Invalid or unsupported ticker: {0}")]
    UnresolvableTicker(String),
}
