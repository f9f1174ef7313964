//! Identity backend client using reqwest.
//!
//! This adapter implements the `IdentityApi` port against the backend's
//! `/login`, `/register` and `/user/me` endpoints. All bodies are JSON and
//! the session token travels as a bearer credential.

use async_trait::async_trait;
use latch_application::ports::{IdentityApi, IdentityError};
use latch_domain::contract::{CURRENT_USER_PATH, LOGIN_PATH, REGISTER_PATH};
use latch_domain::{
    CurrentUserResponse, LoginCredentials, LoginResponse, MessageResponse, RegistrationAttributes,
    SessionToken, UserProfile,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, Url};
use tracing::debug;

use crate::config::ClientConfig;

/// HTTP client for the identity endpoints.
///
/// No timeout or retry is configured: failures surface on the first
/// attempt and last as long as the transport allows.
#[derive(Debug, Clone)]
pub struct ReqwestIdentityApi {
    client: Client,
    base_url: Url,
}

impl ReqwestIdentityApi {
    /// Creates a client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityError> {
        self.base_url
            .join(path)
            .map_err(|e| IdentityError::Transport(format!("invalid endpoint '{path}': {e}")))
    }

    /// Maps reqwest errors raised before a response arrived.
    fn map_error(error: reqwest::Error) -> IdentityError {
        if error.is_timeout() {
            return IdentityError::Transport(format!("request timed out: {error}"));
        }
        if error.is_connect() {
            return IdentityError::Transport(format!("connection failed: {error}"));
        }
        IdentityError::Transport(error.to_string())
    }

    /// Builds a rejection from a non-2xx response.
    async fn rejection(response: Response) -> IdentityError {
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        let message = MessageResponse::message_from_body(&body);
        debug!(status, has_message = message.is_some(), "request rejected");
        IdentityError::Rejected { status, message }
    }
}

#[async_trait]
impl IdentityApi for ReqwestIdentityApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, IdentityError> {
        let url = self.endpoint(LOGIN_PATH)?;
        debug!(%url, user = %credentials.username, "POST login");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await
            .map_err(Self::map_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::MalformedResponse(format!("login body: {e}")))?;
        let raw = body
            .token
            .ok_or_else(|| IdentityError::MalformedResponse("login response has no token".into()))?;
        SessionToken::new(raw).map_err(|e| IdentityError::MalformedResponse(e.to_string()))
    }

    async fn register(&self, attributes: &RegistrationAttributes) -> Result<(), IdentityError> {
        let url = self.endpoint(REGISTER_PATH)?;
        debug!(%url, "POST register");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(attributes)
            .send()
            .await
            .map_err(Self::map_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, IdentityError> {
        let url = self.endpoint(CURRENT_USER_PATH)?;
        debug!(%url, token = %token.preview(), "GET current user");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token.bearer_header())
            .send()
            .await
            .map_err(Self::map_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: CurrentUserResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::MalformedResponse(format!("profile body: {e}")))?;
        Ok(body.user)
    }
}
