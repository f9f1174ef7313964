//! Latch Domain - Core session types
//!
//! This crate defines the domain model for the Latch session client.
//! All types here are pure Rust with no I/O dependencies.

pub mod contract;
pub mod credentials;
pub mod error;
pub mod navigation;
pub mod session;

pub use contract::{CurrentUserResponse, LoginResponse, MessageResponse};
pub use credentials::{LoginCredentials, RegistrationAttributes};
pub use error::{DomainError, DomainResult};
pub use navigation::NavigationTarget;
pub use session::{SessionState, SessionToken, UserProfile};
