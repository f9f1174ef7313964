//! Navigation targets triggered by session transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A view the client moves to after a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    /// Unauthenticated landing view, after logout.
    Home,
    /// Authenticated landing view, after login.
    Profile,
    /// Confirmation view, after registration.
    RegistrationComplete,
}

impl NavigationTarget {
    /// Route path of the view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Profile => "/profile",
            Self::RegistrationComplete => "/success",
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
