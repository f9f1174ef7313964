//! Identity backend port
//!
//! Contract of the three backend endpoints the session core talks to.

use async_trait::async_trait;
use latch_domain::{LoginCredentials, RegistrationAttributes, SessionToken, UserProfile};

/// Errors returned by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The backend answered with a non-2xx status.
    #[error("rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be used.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Port for the backend identity endpoints.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// `POST /login`: exchanges credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` for non-2xx answers, `Transport` when the backend
    /// is unreachable, `MalformedResponse` when no token is present.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, IdentityError>;

    /// `POST /register`: creates an account.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` for non-2xx answers and `Transport` when the
    /// backend is unreachable.
    async fn register(&self, attributes: &RegistrationAttributes) -> Result<(), IdentityError>;

    /// `GET /user/me`: validates a token into a profile.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` for non-2xx answers, `Transport` when the backend
    /// is unreachable, `MalformedResponse` when the body has no user.
    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, IdentityError>;
}
