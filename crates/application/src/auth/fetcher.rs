//! Session fetcher: resolves a stored token into a profile.

use std::sync::Arc;

use latch_domain::{SessionToken, UserProfile};
use tracing::{debug, warn};

use crate::ports::{IdentityApi, IdentityError};

/// Why a token could not be turned into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The backend refused the token (expired, revoked, unknown).
    Rejected {
        /// HTTP status code of the refusal.
        status: u16,
    },
    /// The backend could not be reached.
    Unreachable,
    /// The backend answered 2xx without a usable profile.
    Malformed,
}

/// Outcome of validating a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    /// The token is valid for this user.
    Authenticated(UserProfile),
    /// The token must not be used; the caller discards it.
    Invalid(InvalidReason),
}

/// Calls the identity endpoint with a bearer token.
///
/// Every failure resolves to [`SessionResolution::Invalid`]: an error is
/// never treated as authenticated. The fetcher does not touch the token
/// store.
#[derive(Clone)]
pub struct SessionFetcher {
    api: Arc<dyn IdentityApi>,
}

impl SessionFetcher {
    /// Creates a fetcher over the given backend.
    #[must_use]
    pub fn new(api: Arc<dyn IdentityApi>) -> Self {
        Self { api }
    }

    /// Validates `token` with a single call to the identity endpoint.
    pub async fn resolve(&self, token: &SessionToken) -> SessionResolution {
        match self.api.current_user(token).await {
            Ok(profile) => {
                debug!(token = %token.preview(), user = %profile.username, "token validated");
                SessionResolution::Authenticated(profile)
            }
            Err(IdentityError::Rejected { status, .. }) => {
                debug!(token = %token.preview(), status, "token rejected");
                SessionResolution::Invalid(InvalidReason::Rejected { status })
            }
            Err(IdentityError::Transport(message)) => {
                warn!(token = %token.preview(), error = %message, "identity endpoint unreachable");
                SessionResolution::Invalid(InvalidReason::Unreachable)
            }
            Err(IdentityError::MalformedResponse(message)) => {
                warn!(token = %token.preview(), error = %message, "identity endpoint returned malformed profile");
                SessionResolution::Invalid(InvalidReason::Malformed)
            }
        }
    }
}
