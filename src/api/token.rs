//! Persisted bearer-token storage.
//!
//! The browser build keeps the session token in local storage; here the
//! equivalent is a small JSON file next to the user's other client data.
//! In-memory operation (no path) is supported for tests and ephemeral use.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, warn};

/// On-disk shape of the stored credentials.
#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// Thread-safe holder for the bearer token, optionally file-backed.
#[derive(Debug)]
pub struct TokenStore {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Creates an in-memory token store.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: RwLock::new(None),
        }
    }

    /// Creates a file-backed token store, loading any previously saved token.
    ///
    /// A missing or unreadable file is treated as "not logged in" rather
    /// than an error.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoredToken>(&raw) {
                Ok(stored) => {
                    debug!("Loaded session token from {:?}", path);
                    Some(stored.token)
                }
                Err(e) => {
                    warn!("Ignoring malformed token file {:?}: {}", path, e);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path: Some(path),
            token: RwLock::new(token),
        }
    }

    /// Returns the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Stores a new token, persisting it when file-backed.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        if let Some(path) = &self.path {
            let stored = StoredToken {
                token: token.clone(),
            };
            match serde_json::to_string(&stored) {
                Ok(json) => {
                    if let Err(e) = fs::write(path, json) {
                        warn!("Failed to persist session token to {:?}: {}", path, e);
                    }
                }
                Err(e) => warn!("Failed to serialize session token: {}", e),
            }
        }
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    /// Clears the token, removing the persisted copy when file-backed.
    ///
    /// Called by the client on a 401 response.
    pub fn clear(&self) {
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    warn!("Failed to remove token file {:?}: {}", path, e);
                }
            }
        }
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let store = TokenStore::in_memory();
        assert_eq!(store.get(), None);

        store.set("abc123");
        assert_eq!(store.get(), Some("abc123".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_backed_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");

        let store = TokenStore::from_file(&path);
        assert_eq!(store.get(), None);
        store.set("session-token");
        assert!(path.exists());

        // A fresh store sees the persisted token
        let reloaded = TokenStore::from_file(&path);
        assert_eq!(reloaded.get(), Some("session-token".to_string()));

        reloaded.clear();
        assert!(!path.exists());
        assert_eq!(TokenStore::from_file(&path).get(), None);
    }

    #[test]
    fn test_malformed_file_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();

        let store = TokenStore::from_file(&path);
        assert_eq!(store.get(), None);
    }
}
