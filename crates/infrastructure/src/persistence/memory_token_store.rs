//! In-memory token store.

use std::sync::{Arc, PoisonError, RwLock};

use latch_application::ports::{TokenStore, TokenStoreError};
use latch_domain::SessionToken;

/// Process-local token slot.
///
/// Does not survive a restart. Clones share the same slot, so a clone can
/// stand in for "the same storage after a reload" in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Option<SessionToken>>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<SessionToken> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
