//! Token persistence adapters

mod file_token_store;
mod memory_token_store;

pub use file_token_store::{FileTokenStore, TOKEN_KEY};
pub use memory_token_store::MemoryTokenStore;
