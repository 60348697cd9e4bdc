//! Error types for meeting API operations.
//!
//! Two classes of failure are kept apart:
//!
//! - [`ApiError::InvalidArgument`] is raised before any request is sent,
//!   when a required argument is missing or empty. It indicates a bug in
//!   the caller.
//! - Every other variant comes back from the transport or the server.

use thiserror::Error;

/// HTTP status the server uses for "not signed in / not allowed".
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// HTTP status for a missing resource.
pub const STATUS_NOT_FOUND: u16 = 404;

/// An error returned by a meeting API operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required argument was missing or empty; nothing was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered with a non-success status.
    #[error("HTTP {code}: {msg}")]
    Http {
        /// HTTP status code.
        code: u16,
        /// Raw response body.
        msg: String,
    },

    /// The request never produced a response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates an HTTP error from a status code and raw body.
    pub fn http(code: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            code,
            msg: msg.into(),
        }
    }

    /// Returns the HTTP status, if the server answered.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Http { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the server refused access.
    pub fn is_unauthorized(&self) -> bool {
        self.code() == Some(STATUS_UNAUTHORIZED)
    }

    /// Returns true if the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(STATUS_NOT_FOUND)
    }

    /// Returns true if this is a local precondition violation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// A specialized Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
