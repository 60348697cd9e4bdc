//! Page controller errors.

use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors raised by the page controller and its collaborators.
#[derive(Debug, Error)]
pub enum PageError {
    /// The push channel refused the subscription.
    #[error("push subscription failed: {0}")]
    Push(String),

    /// An operation that needs a loaded profile ran before the initial load.
    #[error("meeting profile has not been loaded")]
    NotLoaded,
}
