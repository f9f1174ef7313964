//! Wire types of the backend identity endpoints.
//!
//! - `POST /login` answers `{ "token": ... }` or `{ "message": ... }`
//! - `POST /register` answers an empty 2xx or `{ "message": ... }`
//! - `GET /user/me` answers `{ "user": { ... } }`

use serde::{Deserialize, Serialize};

use crate::session::UserProfile;

/// Path of the login endpoint, relative to the backend base URL.
pub const LOGIN_PATH: &str = "login";
/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "register";
/// Path of the identity endpoint.
pub const CURRENT_USER_PATH: &str = "user/me";

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The issued bearer token. Missing or blank tokens are a malformed response.
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable reason supplied by the backend.
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Parses a rejection body, keeping only a non-blank message.
    #[must_use]
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Body of a successful `GET /user/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// The authenticated user's profile.
    pub user: UserProfile,
}
