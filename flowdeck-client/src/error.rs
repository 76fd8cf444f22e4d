//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: host unreachable, DNS failure,
    /// cross-origin rejection, offline. No response was obtained.
    #[error("connection failed")]
    ConnectionFailed,

    /// The service responded with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The service responded successfully but the body did not parse
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether this error means the service was unreachable.
    pub fn is_connection_failed(&self) -> bool {
        matches!(self, ClientError::ConnectionFailed)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
