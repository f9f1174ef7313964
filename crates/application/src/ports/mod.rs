//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the session core and external systems.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod identity_api;
mod navigator;
mod token_store;

pub use identity_api::{IdentityApi, IdentityError};
pub use navigator::Navigator;
pub use token_store::{TokenStore, TokenStoreError};
