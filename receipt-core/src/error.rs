//! Error types for the receipt document model.

use thiserror::Error;

/// Result type for receipt document operations.
pub type ReceiptResult<T> = Result<T, ReceiptError>;

/// Errors that can occur while constructing a receipt document.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A pixel buffer did not match its declared dimensions.
    #[error("Invalid bitmap: {0}")]
    InvalidBitmap(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
