//! Session domain types

mod profile;
mod state;
mod token;

pub use profile::UserProfile;
pub use state::SessionState;
pub use token::SessionToken;
