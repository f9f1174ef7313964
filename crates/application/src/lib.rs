//! Latch Application - Session use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (token storage, identity backend, navigation)
//! - The session fetcher and auth controller
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod ports;

pub use auth::{
    AuthController, InvalidReason, SessionFetcher, SessionResolution, TransportFailurePolicy,
};
pub use error::{AuthFailure, AuthResult};
pub use ports::{IdentityApi, IdentityError, Navigator, TokenStore, TokenStoreError};
