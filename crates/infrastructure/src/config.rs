//! Client configuration.
//!
//! The backend base URL and the session file location come from the
//! environment or command line; this module validates and normalizes them.

use std::path::PathBuf;

use url::Url;

use crate::persistence::FileTokenStore;

/// Backend used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("Latch/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The backend URL could not be parsed.
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl {
        /// The rejected value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The backend URL does not use HTTP(S).
    #[error("unsupported backend URL scheme: {0}")]
    UnsupportedScheme(String),

    /// No platform data directory to hold the session file.
    #[error("could not determine a data directory for the session file")]
    NoDataDir,
}

/// Settings needed to reach the backend and persist the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, always ending in `/`.
    pub backend_url: Url,
    /// Location of the session file.
    pub token_file: PathBuf,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration using the default session file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or no data directory exists.
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        let token_file = FileTokenStore::default_path().ok_or(ConfigError::NoDataDir)?;
        Self::with_token_file(backend_url, token_file)
    }

    /// Creates a configuration with an explicit session file.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_token_file(
        backend_url: &str,
        token_file: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            token_file: token_file.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Overrides the `User-Agent` (builder pattern).
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Parses the base URL, keeping any path prefix joinable.
///
/// `http://host/api` becomes `http://host/api/` so that endpoint paths are
/// appended instead of replacing the last segment.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBackendUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
