//! File-backed token store.
//!
//! The token lives in a small JSON key-value file, by default in the
//! platform data directory:
//! - Linux: ~/.local/share/latch/session.json
//! - macOS: ~/Library/Application Support/latch/session.json
//! - Windows: %LOCALAPPDATA%/latch/session.json
//!
//! ```json
//! {
//!   "token": "eyJhbGciOi..."
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use latch_application::ports::{TokenStore, TokenStoreError};
use latch_domain::SessionToken;
use serde_json::Value;
use tracing::{debug, warn};

/// Well-known key holding the session token.
pub const TOKEN_KEY: &str = "token";

type Entries = BTreeMap<String, Value>;

/// Token store persisted to a JSON file.
///
/// Reads and writes are synchronous. Writes go through a temporary file
/// followed by a rename, so a crash never leaves a half-written token.
/// Keys other than [`TOKEN_KEY`] are left untouched.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default session file path, if a data directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("latch").join("session.json"))
    }

    /// Returns the path of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, TokenStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| TokenStoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(TokenStoreError::Io(e)),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Sorted keys (`BTreeMap`), pretty-printed, newline-terminated.
        let mut content = serde_json::to_vec_pretty(entries)
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        content.push(b'\n');

        let temp_path = self.path.with_extension("json.tmp");
        write_private(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn remove_file(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(TokenStoreError::Io(e)),
            _ => Ok(()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<SessionToken> {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return None;
            }
        };

        match entries.get(TOKEN_KEY)? {
            Value::String(raw) => match SessionToken::new(raw.as_str()) {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "ignoring stored token");
                    None
                }
            },
            _ => {
                warn!(path = %self.path.display(), "stored token is not a string");
                None
            }
        }
    }

    fn set(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "overwriting unreadable session file");
            Entries::new()
        });
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.as_str().to_string()));
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), token = %token.preview(), "session token written");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(TokenStoreError::Serialization(_)) => return self.remove_file(),
            Err(e) => return Err(e),
        };

        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            self.remove_file()?;
        } else {
            self.write_entries(&entries)?;
        }
        debug!(path = %self.path.display(), "session token cleared");
        Ok(())
    }
}

/// Writes a file readable only by the current user on Unix.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
