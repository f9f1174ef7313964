//! Token store port

use latch_domain::SessionToken;

/// Errors that can occur when writing the token slot.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No location is available for the store.
    #[error("Storage location unavailable: {0}")]
    Unavailable(String),
}

/// Durable, synchronous slot holding at most one session token.
///
/// Implementations must survive a process restart (except in-memory test
/// stores) and must never hold more than one token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token.
    ///
    /// Unreadable storage is reported as `None`: an unusable slot means
    /// logged out.
    fn get(&self) -> Option<SessionToken>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written.
    fn set(&self, token: &SessionToken) -> Result<(), TokenStoreError>;

    /// Removes the stored token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn clear(&self) -> Result<(), TokenStoreError>;
}
