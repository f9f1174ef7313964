//! In-memory port implementations for controller tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use latch_domain::{
    LoginCredentials, NavigationTarget, RegistrationAttributes, SessionToken, UserProfile,
};
use tokio::sync::Notify;

use crate::ports::{IdentityApi, IdentityError, Navigator, TokenStore, TokenStoreError};

/// Token slot kept in memory, with an optional write failure.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<SessionToken>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.slot.lock().unwrap() = Some(SessionToken::new(token).unwrap());
        store
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn token(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| t.as_str().to_string())
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<SessionToken> {
        self.slot.lock().unwrap().clone()
    }

    fn set(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TokenStoreError::Unavailable("disk full".to_string()));
        }
        *self.slot.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TokenStoreError::Unavailable("disk full".to_string()));
        }
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// Records every navigation.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<NavigationTarget>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<NavigationTarget> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        self.visited.lock().unwrap().push(target);
    }
}

/// Pauses a fake call until the test releases it.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    /// Notified once the call is waiting.
    pub entered: Arc<Notify>,
    /// Notify to let the call continue.
    pub release: Arc<Notify>,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Backend double following the identity endpoint contract.
#[derive(Debug, Default)]
pub struct FakeIdentityApi {
    passwords: Mutex<HashMap<String, String>>,
    sessions: Mutex<HashMap<String, UserProfile>>,
    registrations: Mutex<Vec<RegistrationAttributes>>,
    offline: AtomicBool,
    omit_token: AtomicBool,
    login_gate: Mutex<Option<Gate>>,
    validation_gate: Mutex<Option<(String, Gate)>>,
}

impl FakeIdentityApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert(username.to_string(), password.to_string());
    }

    /// Issues a valid token without going through login.
    pub fn issue_token(&self, username: &str) -> SessionToken {
        let token = SessionToken::new(format!("token-for-{username}")).unwrap();
        self.sessions
            .lock()
            .unwrap()
            .insert(token.as_str().to_string(), UserProfile::new(username));
        token
    }

    /// Invalidates every issued token, as an expiry would.
    pub fn revoke_all(&self) {
        self.sessions.lock().unwrap().clear();
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes login answer 2xx without a token.
    pub fn omit_token(&self) {
        self.omit_token.store(true, Ordering::SeqCst);
    }

    pub fn registrations(&self) -> Vec<RegistrationAttributes> {
        self.registrations.lock().unwrap().clone()
    }

    /// Holds the next login call until the gate is released.
    pub fn gate_next_login(&self) -> Gate {
        let gate = Gate::default();
        *self.login_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Holds the next validation of `token` until the gate is released.
    pub fn gate_validation_of(&self, token: &str) -> Gate {
        let gate = Gate::default();
        *self.validation_gate.lock().unwrap() = Some((token.to_string(), gate.clone()));
        gate
    }

    fn check_online(&self) -> Result<(), IdentityError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(IdentityError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityApi for FakeIdentityApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionToken, IdentityError> {
        let gate = self.login_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.check_online()?;

        let expected = self
            .passwords
            .lock()
            .unwrap()
            .get(&credentials.username)
            .cloned();
        match expected {
            None => Err(IdentityError::Rejected {
                status: 404,
                message: Some("User not found".to_string()),
            }),
            Some(password) if password != credentials.password() => Err(IdentityError::Rejected {
                status: 401,
                message: Some("Invalid password".to_string()),
            }),
            Some(_) if self.omit_token.load(Ordering::SeqCst) => Err(
                IdentityError::MalformedResponse("missing token".to_string()),
            ),
            Some(_) => Ok(self.issue_token(&credentials.username)),
        }
    }

    async fn register(&self, attributes: &RegistrationAttributes) -> Result<(), IdentityError> {
        self.check_online()?;

        let Some(username) = attributes.username() else {
            return Err(IdentityError::Rejected {
                status: 400,
                message: None,
            });
        };
        let mut passwords = self.passwords.lock().unwrap();
        if passwords.contains_key(username) {
            return Err(IdentityError::Rejected {
                status: 409,
                message: Some("Username already exists".to_string()),
            });
        }
        let password = attributes
            .get("password")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        passwords.insert(username.to_string(), password.to_string());
        drop(passwords);
        self.registrations.lock().unwrap().push(attributes.clone());
        Ok(())
    }

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, IdentityError> {
        let gate = {
            let mut slot = self.validation_gate.lock().unwrap();
            let matches = slot
                .as_ref()
                .is_some_and(|(gated, _)| gated.as_str() == token.as_str());
            if matches {
                slot.take().map(|(_, g)| g)
            } else {
                None
            }
        };
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.check_online()?;

        self.sessions
            .lock()
            .unwrap()
            .get(token.as_str())
            .cloned()
            .ok_or(IdentityError::Rejected {
                status: 401,
                message: Some("Invalid token".to_string()),
            })
    }
}
