//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rasterizing a receipt.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The receipt configuration cannot produce a canvas.
    ///
    /// Configuration is never validated while the document is built; it is
    /// classified here, at render time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A font asset could not be loaded or parsed.
    #[error("Failed to load font: {0}")]
    FontLoad(String),

    /// An item references a font handle unknown to the font store.
    #[error("Unknown font handle: {0}")]
    FontNotFound(String),

    /// An image payload could not be decoded.
    #[error("Failed to decode image: {0}")]
    Image(String),

    /// Encoding the rendered canvas failed.
    #[error("Export failed: {0}")]
    Export(String),
}
