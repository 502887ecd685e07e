//! Session store - the persisted bearer credential
//!
//! A single string credential lives under [`TOKEN_KEY`] in a key/value
//! backend. The HTTP client clears it on 401, login sets it, logout clears it.
//! Everyone else reads snapshots through [`SessionStore::get`].

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::ClientConfig;

/// Storage key of the bearer credential
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value storage for client-side persisted state.
pub trait CredentialBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local backend; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl CredentialBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// JSON object file, one entry per key.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CredentialBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

/// Credential change broadcast by [`SessionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Set,
    Cleared,
}

/// Shared handle to the persisted credential.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn CredentialBackend>,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn CredentialBackend>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { backend, events }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    /// File-backed when `credential_path` is configured.
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.credential_path {
            Some(path) => Self::new(Arc::new(FileBackend::new(path))),
            None => Self::in_memory(),
        }
    }

    /// Snapshot of the current credential.
    ///
    /// Storage failures read as "no credential".
    pub fn get(&self) -> Option<String> {
        match self.backend.read(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read credential");
                None
            }
        }
    }

    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.backend.write(TOKEN_KEY, token)?;
        let _ = self.events.send(SessionEvent::Set);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(TOKEN_KEY)?;
        let _ = self.events.send(SessionEvent::Cleared);
        tracing::debug!("Credential cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Subscribe to credential changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = SessionStore::in_memory();
        assert!(store.get().is_none());
        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_events_are_broadcast() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();
        store.set("abc").unwrap();
        store.clear().unwrap();
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::Set);
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::Cleared);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_file_backend_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth").join("credential.json");

        let store = SessionStore::new(Arc::new(FileBackend::new(&path)));
        store.set("persisted").unwrap();
        assert!(path.exists());

        let reopened = SessionStore::new(Arc::new(FileBackend::new(&path)));
        assert_eq!(reopened.get().as_deref(), Some("persisted"));

        reopened.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_empty_token_reads_as_none() {
        let store = SessionStore::in_memory();
        store.set("").unwrap();
        assert!(store.get().is_none());
    }
}
