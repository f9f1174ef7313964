//! Session lifecycle for the Latch client.
//!
//! This module provides:
//! - `SessionFetcher`: validates a token into a profile
//! - `AuthController`: login, registration, logout and restoration
//! - A generation-based guard so only the latest session operation commits

mod controller;
mod fetcher;
mod sequencer;

#[cfg(test)]
mod fakes;

pub use controller::{AuthController, TransportFailurePolicy};
pub use fetcher::{InvalidReason, SessionFetcher, SessionResolution};
