//! Latch Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::{ReqwestIdentityApi, TracingNavigator};
pub use config::{ClientConfig, ConfigError, DEFAULT_BACKEND_URL};
pub use persistence::{FileTokenStore, MemoryTokenStore};
