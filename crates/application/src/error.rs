//! Application error types

use thiserror::Error;

/// Fallback shown when the backend rejects a login without a message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Fallback shown when the backend rejects a registration without a message.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// Message shown for transport-level failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Unable to connect to server.";

/// Failures returned by login and registration.
///
/// These are values for the caller to display, not faults: the `Display`
/// output is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthFailure {
    /// The backend rejected the credentials or attributes.
    #[error("{message}")]
    CredentialsRejected {
        /// Backend-supplied message, or the generic fallback.
        message: String,
    },

    /// The backend could not be reached.
    #[error("Network error: Unable to connect to server.")]
    NetworkUnreachable,

    /// The backend answered 2xx with a body that could not be used.
    #[error("Unexpected response from server.")]
    MalformedResponse,

    /// The token could not be written to local storage.
    #[error("Unable to save session: {0}")]
    Storage(String),

    /// A newer session operation committed while this one was in flight.
    #[error("Login was interrupted by another session change.")]
    Superseded,
}

impl AuthFailure {
    /// Builds a rejection from an optional backend message.
    #[must_use]
    pub fn rejected(message: Option<String>, fallback: &str) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self::CredentialsRejected { message }
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for login and registration.
pub type AuthResult = Result<(), AuthFailure>;
