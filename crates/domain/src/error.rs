//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A session token was empty or whitespace.
    #[error("invalid session token: {0}")]
    InvalidToken(String),

    /// A username was empty or whitespace.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// A registration attribute could not be represented.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
