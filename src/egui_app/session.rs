//! Session Storage
//!
//! A small persistent key/value store (the client's `localStorage`) and the
//! session token helper built on top of it.
//!
//! The store keeps every item in memory and rewrites a single JSON file on
//! each mutation. It is shared between the UI thread and the network tasks,
//! so all access goes through an `RwLock`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use steward::egui_app::session::{ClientStorage, SessionStore};
//!
//! let storage = Arc::new(ClientStorage::open("/tmp/steward").unwrap());
//! let session = SessionStore::new(storage);
//! session.set_token("abc").unwrap();
//! assert!(session.is_authenticated());
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::egui_app::navigation::Route;
use crate::shared::error::ClientError;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

const STORAGE_FILE: &str = "storage.json";

/// Persistent string key/value storage
#[derive(Debug)]
pub struct ClientStorage {
    path: Option<PathBuf>,
    items: RwLock<BTreeMap<String, String>>,
}

impl ClientStorage {
    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            path: None,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Open (or create) the storage file inside `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ClientError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(STORAGE_FILE);

        let items = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), items = items.len(), "client storage opened");
        Ok(Self {
            path: Some(path),
            items: RwLock::new(items),
        })
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }

    /// Store any serializable value as JSON under `key`
    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    /// Load a JSON value, returning `default` when missing or unreadable.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_item(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                error!(key, error = %e, "stored value is not valid JSON");
                default
            }),
            None => default,
        }
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(items)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Session token helper
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<ClientStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<ClientStorage>) -> Self {
        Self { storage }
    }

    /// Session backed by throwaway in-memory storage
    pub fn in_memory() -> Self {
        Self::new(Arc::new(ClientStorage::in_memory()))
    }

    pub fn storage(&self) -> &Arc<ClientStorage> {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.storage.set_item(TOKEN_KEY, token)?;
        info!("session token stored");
        Ok(())
    }

    /// Clear the token. Failures are logged; the in-memory copy is gone either way.
    pub fn clear_token(&self) {
        if let Err(e) = self.storage.remove_item(TOKEN_KEY) {
            error!(error = %e, "failed to persist token removal");
        }
        info!("session token cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Start-up check on the entry page: a stored token skips straight to the
    /// dashboard without contacting the backend.
    pub fn entry_redirect(&self, path: &str) -> Option<Route> {
        if path == Route::Entry.path() && self.is_authenticated() {
            Some(Route::Dashboard)
        } else {
            None
        }
    }

    /// Guard for authenticated pages: without a token, go back to the entry
    /// page. Unknown paths count as protected.
    pub fn require_auth(&self, path: &str) -> Option<Route> {
        let protected = Route::from_path(path).map_or(true, Route::requires_auth);
        if protected && !self.is_authenticated() {
            Some(Route::Entry)
        } else {
            None
        }
    }
}
