//! Error types for the Zephr admin API client.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ZephrClientResult<T> = Result<T, ZephrClientError>;

/// Errors raised by signing, the HTTP client, or the sync engine.
#[derive(Debug, Error)]
pub enum ZephrClientError {
    /// A required signing input was empty or absent. The payload names
    /// the offending field.
    #[error("missing signing input: {0}")]
    MissingSigningInput(&'static str),

    /// The credentials pair is incomplete (access key or secret key absent).
    #[error("Zephr credentials not provided")]
    MissingCredentials,

    /// Client construction or configuration problem.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The target rejected our authentication (401).
    #[error("authentication failed: {0}")]
    AuthError(String),

    /// Resource not found on the target (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The target is rate limiting us (429).
    #[error("rate limited by Zephr (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-success response from the admin API.
    #[error("Zephr API error (status {status}): {detail}")]
    ApiError { status: u16, detail: String },

    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    ParseError(String),
}
