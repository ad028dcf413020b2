//! Compression client errors

use thiserror::Error;

/// Tinify API operation errors
#[derive(Debug, Error)]
pub enum TinifyError {
    /// Bad API key or exhausted compression quota (401, 403, 429).
    #[error("Account error: {0}")]
    Account(String),

    /// Request rejected by the API (other 4xx), e.g. an unsupported buffer.
    #[error("Client error: {0}")]
    Client(String),

    /// The API itself failed (5xx).
    #[error("Server error: {0}")]
    Server(String),

    /// Transport-level failure (DNS, TLS, connect, read).
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// The API answered outside its documented contract.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result type for compression operations
pub type TinifyResult<T> = Result<T, TinifyError>;
