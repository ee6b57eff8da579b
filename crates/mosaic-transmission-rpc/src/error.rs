//! Error type for RPC operations.

use thiserror::Error;

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The configured host cannot be turned into an RPC URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Connection-level failure (DNS, refused, reset, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The daemon rejected the configured credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The daemon kept rejecting the session id after every refresh.
    #[error("session id still rejected after {attempts} attempts")]
    SessionConflict {
        /// Number of requests sent before giving up.
        attempts: u32,
    },

    /// The response does not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The daemon answered with a non-success `result` where a value was expected.
    #[error("server error: {0}")]
    Server(String),
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<url::ParseError> for RpcError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}
