//! Transient credentials sent to the backend.
//!
//! Neither type is ever persisted. Passwords stay wrapped in `secrecy`
//! types and are only exposed when the request body is serialized.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Attribute name treated as secret in registration payloads.
const PASSWORD_KEY: &str = "password";

/// Username and password pair for `POST /login`.
#[derive(Debug)]
pub struct LoginCredentials {
    /// The account username.
    pub username: String,
    password: SecretString,
}

impl LoginCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Returns the password value.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl Serialize for LoginCredentials {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("username", &self.username)?;
        map.serialize_entry(PASSWORD_KEY, self.password.expose_secret())?;
        map.end()
    }
}

/// Arbitrary attribute mapping for `POST /register`.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistrationAttributes(BTreeMap<String, Value>);

impl RegistrationAttributes {
    /// Creates attributes holding a username and password.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUsername`] if the username is blank.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::InvalidUsername("username is empty".to_string()));
        }
        let mut attributes = BTreeMap::new();
        attributes.insert("username".to_string(), Value::String(username));
        attributes.insert(PASSWORD_KEY.to_string(), Value::String(password.into()));
        Ok(Self(attributes))
    }

    /// Builds attributes from an existing JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAttribute`] if the value is not an object.
    pub fn from_json(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(DomainError::InvalidAttribute(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Adds an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts or replaces an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns an attribute by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the username attribute if it is a string.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RegistrationAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if key.eq_ignore_ascii_case(PASSWORD_KEY) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}
