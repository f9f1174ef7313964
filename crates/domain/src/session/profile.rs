//! User profile returned by the identity endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account attributes of the authenticated user.
///
/// Only `username` is interpreted; every other field the backend sends is
/// kept verbatim in `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The account's username.
    pub username: String,
    /// Any other attributes returned by the backend.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl UserProfile {
    /// Creates a profile with no extra attributes.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute (builder pattern).
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns an attribute by name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
