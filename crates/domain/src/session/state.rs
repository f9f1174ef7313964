//! Session state machine value.
//!
//! The controller in the application layer is the only writer; every other
//! component observes a clone of this value.

use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Current authentication state of the client.
///
/// - `Restoring`: startup check not resolved yet; treated as unauthenticated
/// - `LoggedOut`: no valid token in the store
/// - `LoggedIn`: a validated token is stored and the profile is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the startup check to resolve.
    #[default]
    Restoring,

    /// Not authenticated.
    LoggedOut,

    /// Authenticated as the given user.
    LoggedIn {
        /// Profile of the authenticated user.
        profile: UserProfile,
    },
}

impl SessionState {
    /// Creates a `LoggedIn` state.
    #[must_use]
    pub const fn logged_in(profile: UserProfile) -> Self {
        Self::LoggedIn { profile }
    }

    /// Returns true only for `LoggedIn`.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// Returns true while the startup check is pending.
    #[must_use]
    pub const fn is_restoring(&self) -> bool {
        matches!(self, Self::Restoring)
    }

    /// Returns the current user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::LoggedIn { profile } => Some(profile),
            Self::Restoring | Self::LoggedOut => None,
        }
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Restoring => "restoring",
            Self::LoggedOut => "logged out",
            Self::LoggedIn { .. } => "logged in",
        }
    }
}
