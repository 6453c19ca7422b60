//! Durable credential storage
//!
//! The store holds one record with two scalars: the bearer token and, for
//! lease-based expiry, the instant the lease ends. Every write replaces the
//! whole record.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Persisted credential record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token as issued by the login endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Lease end (lease policy only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Backing medium for the credential record.
pub trait SessionStorage: Send + Sync {
    /// Read the current record, if any.
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;

    /// Replace the record.
    fn save(&self, session: &StoredSession) -> Result<(), SessionError>;

    /// Delete the record. Deleting an absent record succeeds.
    fn clear(&self) -> Result<(), SessionError>;
}

/// YAML file store (mode 0600 on Unix).
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn storage_err(&self, action: &str, err: impl std::fmt::Display) -> SessionError {
        SessionError::Storage(format!("{} {}: {}", action, self.path.display(), err))
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_err("read", e)),
        };

        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| self.storage_err("parse", e))
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.storage_err("create dir for", e))?;
        }

        let contents = serde_yaml::to_string(session).map_err(|e| self.storage_err("encode", e))?;

        // Write a sibling file first so readers never observe a partial record
        let tmp = self.path.with_extension("yaml.tmp");
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&tmp)
            .map_err(|e| self.storage_err("create", e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| self.storage_err("write", e))?;

        // An existing temp file keeps its old mode on open
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            file.set_permissions(perms)
                .map_err(|e| self.storage_err("chmod", e))?;
        }
        drop(file);

        std::fs::rename(&tmp, &self.path).map_err(|e| self.storage_err("replace", e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_err("remove", e)),
        }
    }
}

/// In-process store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    record: std::sync::Mutex<Option<StoredSession>>,
}

#[cfg(test)]
impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredSession>>, SessionError> {
        self.record
            .lock()
            .map_err(|_| SessionError::Storage("memory store lock poisoned".to_string()))
    }
}

#[cfg(test)]
impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_is_none() {
        let temp = tempdir().unwrap();
        let storage = FileSessionStorage::new(temp.path().join("session.yaml"));
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_save_load_clear() {
        let temp = tempdir().unwrap();
        let storage = FileSessionStorage::new(temp.path().join("dir").join("session.yaml"));

        let record = StoredSession {
            token: Some("abc.def.ghi".to_string()),
            expires_at: None,
        };
        storage.save(&record).unwrap();
        assert_eq!(storage.load().unwrap(), Some(record));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        // Second clear is a no-op
        storage.clear().unwrap();
    }

    #[test]
    fn test_file_storage_replaces_whole_record() {
        let temp = tempdir().unwrap();
        let storage = FileSessionStorage::new(temp.path().join("session.yaml"));

        storage
            .save(&StoredSession {
                token: Some("old".to_string()),
                expires_at: Some(Utc::now()),
            })
            .unwrap();
        storage
            .save(&StoredSession {
                token: Some("new".to_string()),
                expires_at: None,
            })
            .unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("new"));
        assert!(loaded.expires_at.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        let storage = FileSessionStorage::new(path.clone());
        storage
            .save(&StoredSession {
                token: Some("t".to_string()),
                expires_at: None,
            })
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_tightens_stale_temp_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        let stale = path.with_extension("yaml.tmp");
        std::fs::write(&stale, "token: stale\n").unwrap();
        std::fs::set_permissions(&stale, std::fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileSessionStorage::new(path.clone());
        storage
            .save(&StoredSession {
                token: Some("fresh".to_string()),
                expires_at: None,
            })
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!stale.exists());
        assert_eq!(storage.load().unwrap().unwrap().token.as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_storage_corrupt_file_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        std::fs::write(&path, "token: [broken").unwrap();

        let storage = FileSessionStorage::new(path);
        assert!(matches!(storage.load(), Err(SessionError::Storage(_))));
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        let record = StoredSession {
            token: Some("t".to_string()),
            expires_at: None,
        };
        storage.save(&record).unwrap();
        assert_eq!(storage.load().unwrap(), Some(record));

        storage.clear().unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }
}
