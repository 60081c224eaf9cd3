//! Persisted authentication state.
//!
//! The session is a small key/value store holding the bearer token and a
//! JSON snapshot of the signed-in user. Both values are written in one batch
//! on login and removed in one batch on logout, so a token never exists
//! without its user or the other way round.
//!
//! [`Session`] is created once at startup and shared with the
//! [`ApiClient`](crate::gateway::ApiClient); the backing [`SessionStore`] is
//! injected so tests and the CLI can choose where state lives.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use taskdeck_core::models::User;

use crate::error::StorageError;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Key holding the serialized current user.
pub const USER_KEY: &str = "currentUser";

// ---------------------------------------------------------------------------
// Store abstraction
// ---------------------------------------------------------------------------

/// Durable client-local key/value storage.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store every entry in a single write.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove every key in a single write. Missing keys are not an error.
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError>;
}

/// Process-local store, used in tests and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = self.lock()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = self.lock()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// Store backed by a JSON object in a single file.
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a batch is either fully visible or not at all.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Read the current map for modification. A corrupt file is discarded
    /// since the batch about to be written replaces the session anyway.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "Discarding corrupt session file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let unavailable = |e: std::io::Error| StorageError::Unavailable(e.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }

        let body =
            serde_json::to_string_pretty(map).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).map_err(unavailable)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600)).map_err(unavailable)?;
        }

        fs::rename(&tmp, &self.path).map_err(unavailable)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = self.read_map_for_write()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_map(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.read_map_for_write()?;
        for key in keys {
            map.remove(*key);
        }
        self.write_map(&map)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The signed-in identity, shared by every request.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new<S: SessionStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// A session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemorySessionStore::default())
    }

    /// The persisted bearer token. Storage failures read as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read auth token, sending request unauthenticated");
                None
            }
        }
    }

    /// The persisted user snapshot.
    ///
    /// Returns `None` when nothing is stored, the store cannot be read, or the
    /// stored value is not a valid user document. Never fails.
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read current user");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored current user is not valid JSON");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a token together with its user.
    pub fn establish(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let user_json =
            serde_json::to_string(user).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.store
            .set_all(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])
    }

    /// Remove the token and user together. Clearing an empty session is fine.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_all(&[TOKEN_KEY, USER_KEY])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
