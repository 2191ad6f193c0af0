//! Application error types.
//!
//! Defines `AppError` for every way a comparison can fail. Errors are
//! propagated unmodified to `main`, which reports them and exits non-zero.
//!
//! - `Transport` → network failure, timeout, or an undecodable response body
//! - `Remote` → GitHub answered with a non-success status
//! - `Serialization` → structured output could not be rendered
//! - `Config`, `Cancelled` → local setup problems and user interruption

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote API error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AppError>;
