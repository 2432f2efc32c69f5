//! File-backed session token storage
//!
//! Keeps the token between invocations so the user logs in once. The store
//! is itself a [`SessionObserver`]: it writes the token when a session is
//! acquired and deletes the file when the session is cleared.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{SessionEvent, SessionObserver, SessionToken};
use crate::error::{ExpenseError, ExpenseResult};

/// On-disk representation of a stored session
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: SessionToken,
    saved_at: DateTime<Utc>,
}

/// Persists the session token to a JSON file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token, if any
    pub fn load(&self) -> ExpenseResult<Option<SessionToken>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let stored: StoredSession = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ExpenseError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        Ok(Some(stored.token))
    }

    /// Save a token, replacing any previous one
    pub fn save(&self, token: &SessionToken) -> ExpenseResult<()> {
        let stored = StoredSession {
            token: token.clone(),
            saved_at: Utc::now(),
        };
        write_json_atomic(&self.path, &stored)
    }

    /// Remove the stored token; a missing file is not an error
    pub fn remove(&self) -> ExpenseResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ExpenseError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl SessionObserver for SessionStore {
    fn on_session_event(
        &mut self,
        event: SessionEvent,
        token: Option<&SessionToken>,
    ) -> ExpenseResult<()> {
        match (event, token) {
            (SessionEvent::Acquired, Some(token)) => self.save(token),
            (SessionEvent::Acquired, None) | (SessionEvent::Cleared, _) => self.remove(),
        }
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> ExpenseResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;
    restrict_permissions(&file)?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ExpenseError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// The token grants account access; keep it owner-readable only
#[cfg(unix)]
fn restrict_permissions(file: &File) -> ExpenseResult<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(|e| ExpenseError::Storage(format!("Failed to set permissions: {}", e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> ExpenseResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use tempfile::TempDir;

    fn create_test_store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_load_missing_is_none() {
        let (store, _temp) = create_test_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (store, _temp) = create_test_store();
        let token = SessionToken::new("abc-123").unwrap();

        store.save(&token).unwrap();

        assert_eq!(store.load().unwrap(), Some(token));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (store, _temp) = create_test_store();
        store.save(&SessionToken::new("x").unwrap()).unwrap();

        store.remove().unwrap();
        store.remove().unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(ExpenseError::Storage(_))));
    }

    #[test]
    fn test_blank_stored_token_is_rejected() {
        let (store, _temp) = create_test_store();
        fs::write(
            store.path(),
            r#"{"token": "  ", "saved_at": "2024-11-01T09:00:00Z"}"#,
        )
        .unwrap();
        assert!(matches!(store.load(), Err(ExpenseError::Storage(_))));
    }

    #[test]
    fn test_store_follows_session_events() {
        let (store, temp) = create_test_store();
        let mut session = Session::new();
        session.subscribe(Box::new(store));

        session.acquire(SessionToken::new("live").unwrap()).unwrap();
        let reader = SessionStore::new(temp.path().join("session.json"));
        assert_eq!(reader.load().unwrap().unwrap().as_str(), "live");

        session.clear().unwrap();
        assert!(reader.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _temp) = create_test_store();
        store.save(&SessionToken::new("x").unwrap()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
