//! Auth controller: the single owner of the session state.
//!
//! The controller is the only writer of [`SessionState`]. Views read it
//! through [`AuthController::state`] or observe it with
//! [`AuthController::subscribe`].
//!
//! Login is an explicit two-step operation: the issued token is stored
//! first, then validated against the identity endpoint. A failed
//! validation removes the token again, so the client is never `LoggedIn`
//! without a stored token.

use std::sync::Arc;

use latch_domain::{
    LoginCredentials, NavigationTarget, RegistrationAttributes, SessionState, UserProfile,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::fetcher::{InvalidReason, SessionFetcher, SessionResolution};
use super::sequencer::{Sequencer, Ticket};
use crate::error::{AuthFailure, AuthResult, LOGIN_FAILED_MESSAGE, REGISTRATION_FAILED_MESSAGE};
use crate::ports::{IdentityApi, IdentityError, Navigator, TokenStore};

/// What to do with a stored token when the identity endpoint is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportFailurePolicy {
    /// Discard the token, exactly like a rejected one.
    #[default]
    FailClosed,
    /// Report `LoggedOut` but keep the token for the next restore.
    RetainToken,
}

/// Orchestrates login, registration, logout and session restoration.
pub struct AuthController {
    store: Arc<dyn TokenStore>,
    api: Arc<dyn IdentityApi>,
    fetcher: SessionFetcher,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
    sequencer: Sequencer,
    policy: TransportFailurePolicy,
}

impl AuthController {
    /// Creates a controller in the `Restoring` state.
    ///
    /// Call [`AuthController::restore`] once at startup.
    #[must_use]
    pub fn new(
        store: Arc<dyn TokenStore>,
        api: Arc<dyn IdentityApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Restoring);
        Self {
            store,
            fetcher: SessionFetcher::new(Arc::clone(&api)),
            api,
            navigator,
            state,
            sequencer: Sequencer::new(),
            policy: TransportFailurePolicy::default(),
        }
    }

    /// Sets the transport failure policy (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: TransportFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the transport failure policy.
    #[must_use]
    pub const fn policy(&self) -> TransportFailurePolicy {
        self.policy
    }

    /// Returns a snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Returns the authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    /// Returns true if a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Re-derives the session from the stored token at startup.
    ///
    /// Never reports an error: a missing, rejected or unverifiable token
    /// all end in `LoggedOut`.
    pub async fn restore(&self) {
        debug!("restoring session");
        self.sync_session().await;
    }

    /// Validates the stored token again.
    ///
    /// A rejected token moves `LoggedIn` to `LoggedOut`.
    pub async fn revalidate(&self) {
        debug!("revalidating session");
        self.sync_session().await;
    }

    /// Logs in with a username and password.
    ///
    /// Once the backend accepts the credentials the token is stored, the
    /// session is re-derived from it and the client navigates to the
    /// profile view. If the new token does not validate the session ends in
    /// `LoggedOut`, the same outcome as [`AuthController::restore`], and the
    /// login still counts as accepted.
    ///
    /// # Errors
    ///
    /// Returns the failure to show the user. The session state is left
    /// unchanged on every failure.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult {
        let ticket = self.sequencer.begin();
        let credentials = LoginCredentials::new(username, password);
        debug!(user = %credentials.username, "logging in");

        let token = self.api.login(&credentials).await.map_err(|e| {
            let failure = Self::request_failure(e, LOGIN_FAILED_MESSAGE);
            info!(user = %credentials.username, reason = %failure, "login failed");
            failure
        })?;

        // Step 1: persist the issued token.
        self.sequencer
            .commit(ticket, || self.store.set(&token))
            .ok_or_else(|| Self::superseded(&credentials.username))?
            .map_err(|e| {
                warn!(error = %e, "failed to store session token");
                AuthFailure::Storage(e.to_string())
            })?;
        debug!(token = %token.preview(), "session token stored");

        // Step 2: re-derive the session from it. A token the backend does
        // not confirm ends in `LoggedOut`, but the login itself succeeded.
        let resolution = self.fetcher.resolve(&token).await;
        self.sequencer
            .commit(ticket, || self.settle(resolution))
            .ok_or_else(|| Self::superseded(&credentials.username))?;

        self.navigator.navigate(NavigationTarget::Profile);
        Ok(())
    }

    /// Logs out locally. Never fails and is safe to call repeatedly.
    pub fn logout(&self) {
        let ticket = self.sequencer.begin();
        self.sequencer.commit(ticket, || {
            self.discard_token();
            self.publish(SessionState::LoggedOut);
        });
        self.navigator.navigate(NavigationTarget::Home);
    }

    /// Creates an account. Does not log the new user in.
    ///
    /// # Errors
    ///
    /// Returns the failure to show the user.
    pub async fn register(&self, attributes: &RegistrationAttributes) -> AuthResult {
        debug!(user = attributes.username().unwrap_or("<none>"), "registering");

        self.api.register(attributes).await.map_err(|e| {
            let failure = Self::request_failure(e, REGISTRATION_FAILED_MESSAGE);
            info!(reason = %failure, "registration failed");
            failure
        })?;

        info!(user = attributes.username().unwrap_or("<none>"), "account registered");
        self.navigator.navigate(NavigationTarget::RegistrationComplete);
        Ok(())
    }

    async fn sync_session(&self) {
        let ticket = self.sequencer.begin();

        let Some(token) = self.store.get() else {
            debug!("no stored session token");
            self.commit_or_discard(ticket, || self.publish(SessionState::LoggedOut));
            return;
        };

        let resolution = self.fetcher.resolve(&token).await;
        self.commit_or_discard(ticket, || self.settle(resolution));
    }

    /// Publishes the outcome of a session check, dropping a token that
    /// did not resolve (subject to the transport policy).
    fn settle(&self, resolution: SessionResolution) {
        match resolution {
            SessionResolution::Authenticated(profile) => {
                self.publish(SessionState::logged_in(profile));
            }
            SessionResolution::Invalid(reason) => {
                let retain = reason == InvalidReason::Unreachable
                    && self.policy == TransportFailurePolicy::RetainToken;
                if retain {
                    debug!("backend unreachable, keeping session token");
                } else {
                    info!(?reason, "stored session is no longer valid");
                    self.discard_token();
                }
                self.publish(SessionState::LoggedOut);
            }
        }
    }

    fn commit_or_discard(&self, ticket: Ticket, commit: impl FnOnce()) {
        if self.sequencer.commit(ticket, commit).is_none() {
            debug!("session check superseded, result discarded");
        }
    }

    fn discard_token(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear session token");
        }
    }

    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            info!(from = current.label(), to = next.label(), "session state changed");
            *current = next;
            true
        });
    }

    fn request_failure(error: IdentityError, fallback: &str) -> AuthFailure {
        match error {
            IdentityError::Rejected { message, .. } => AuthFailure::rejected(message, fallback),
            IdentityError::Transport(_) => AuthFailure::NetworkUnreachable,
            IdentityError::MalformedResponse(_) => AuthFailure::MalformedResponse,
        }
    }

    fn superseded(username: &str) -> AuthFailure {
        debug!(user = %username, "login superseded, result discarded");
        AuthFailure::Superseded
    }
}
