//! Error kinds surfaced by the client.
//!
//! None of these are retried internally; retry policy belongs to the caller.

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the model server.
#[derive(Debug, Error)]
pub enum Error {
    /// A response body or stream event could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The connection failed: refused, reset, timed out or cut mid-read.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered the initial request with a non-2xx status.
    #[error("api error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// A request parameter was rejected before sending.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The client configuration is unusable.
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
