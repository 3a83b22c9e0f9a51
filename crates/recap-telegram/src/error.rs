use thiserror::Error;

/// Errors produced by the Bot API client.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `ok: false`.
    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    /// `ok: true` but the `result` field was missing.
    #[error("Telegram API returned ok with no result")]
    EmptyResult,

    /// Request body could not be encoded.
    #[error("JSON encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TelegramError>;
