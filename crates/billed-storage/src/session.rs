//! Session persistence
//!
//! `KeyValueStore` is the string-to-string surface the browser exposes as
//! local storage. `SessionStore` reads and writes the JSON-encoded session
//! record under the `user` key on top of it.

use billed_core::constants::USER_SESSION_KEY;
use billed_core::models::Session;
use billed_core::AppError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Corrupt session record: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session store IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err.to_string())
    }
}

/// Synchronous key-value persistence surface
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory key-value store; clones share the same entries
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}

/// Key-value store persisted as one JSON object in a file
///
/// Every write rewrites the whole file; last writer wins.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<HashMap<String, String>, SessionError> {
        match std::fs::read(&self.path) {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Accessor for the persisted session record
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current session, if someone is signed in
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        match self.store.get_item(USER_SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Persist `session`, replacing any previous one
    pub fn login(&self, session: &Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string(session)?;
        self.store.set_item(USER_SESSION_KEY, &raw)?;
        tracing::info!(email = %session.email, user_type = %session.user_type, "Session stored");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove_item(USER_SESSION_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billed_core::models::UserType;
    use tempfile::tempdir;

    #[test]
    fn test_login_load_logout() {
        let sessions = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        assert!(sessions.load().unwrap().is_none());

        let session = Session::employee("employee@test.tld");
        sessions.login(&session).unwrap();
        assert_eq!(sessions.load().unwrap(), Some(session));

        sessions.logout().unwrap();
        assert!(sessions.load().unwrap().is_none());
    }

    #[test]
    fn test_reads_record_written_by_another_client() {
        let kv = MemoryKeyValueStore::new();
        kv.set_item("user", r#"{"type":"Admin","email":"admin@test.tld","status":"connected"}"#)
            .unwrap();

        let session = SessionStore::new(Arc::new(kv)).load().unwrap().unwrap();
        assert_eq!(session.user_type, UserType::Admin);
        assert_eq!(session.email, "admin@test.tld");
    }

    #[test]
    fn test_corrupt_record() {
        let kv = MemoryKeyValueStore::new();
        kv.set_item("user", "not json").unwrap();
        let result = SessionStore::new(Arc::new(kv)).load();
        assert!(matches!(result, Err(SessionError::Corrupt(_))));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileKeyValueStore::new(&path)
            .set_item("user", r#"{"type":"Employee"}"#)
            .unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(
            reopened.get_item("user").unwrap().as_deref(),
            Some(r#"{"type":"Employee"}"#)
        );

        reopened.remove_item("user").unwrap();
        assert!(FileKeyValueStore::new(&path).get_item("user").unwrap().is_none());
    }
}
