//! Session persistence
//!
//! A session is the durable client-side record of the current API token. It
//! survives process restarts within the same user profile and is the only
//! state the client persists. No expiry is enforced here: a stale token is
//! only discovered when a request carrying it fails.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage interface for the persisted session token
///
/// Seam for swapping the file-backed store for an in-memory one in tests.
pub trait SessionStore: Send + Sync {
    /// Returns the stored token, if any
    fn get(&self) -> Result<Option<String>>;

    /// Persists the token
    fn set(&self, token: &str) -> Result<()>;

    /// Removes any stored token
    fn clear(&self) -> Result<()>;
}

/// File-backed session store
///
/// The token lives in a single file under the user's config directory
/// (or any explicit path, used by tests and `--config` setups).
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default per-user location
    pub fn default_location() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "deskctl").ok_or_else(|| {
            crate::error::DeskError::Config("could not determine config directory".to_string())
        })?;
        Ok(Self::new(dirs.config_dir().join("session")))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let token = fs::read_to_string(&self.path)?;
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory session store for tests
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.token.lock().map_or(None, |guard| guard.clone()))
    }

    fn set(&self, token: &str) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
        Ok(())
    }
}
