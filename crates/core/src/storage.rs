//! Small key-value persistence used for client-local state.

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::warn;

/// File name of the storage document inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// String key-value store injected into the catalog store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageDocument {
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    values: HashMap<String, String>,
}

/// Store persisted as a single JSON document on disk.
pub struct FileStore {
    path: PathBuf,
    // serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store located at [`STORAGE_FILE`] inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(STORAGE_FILE))
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Timestamp of the last successful write, if the document exists.
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read_document()?.updated_at)
    }

    fn read_document(&self) -> Result<StorageDocument> {
        if !self.path.exists() {
            return Ok(StorageDocument::default());
        }
        let contents = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        match serde_json::from_slice(&contents) {
            Ok(document) => Ok(document),
            Err(err) => {
                warn!("Ignoring corrupt storage {}: {err}", self.path.display());
                Ok(StorageDocument::default())
            }
        }
    }

    /// Check that the data directory exists or can be created and accepts new files.
    pub fn ensure_writable(&self) -> Result<()> {
        self.temp_file().map(drop)
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn temp_file(&self) -> Result<NamedTempFile> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
        NamedTempFile::new_in(parent)
            .with_context(|| format!("failed to create temp file in {}", parent.display()))
    }

    fn write_document(&self, document: &StorageDocument) -> Result<()> {
        let serialised = serde_json::to_vec_pretty(document)?;
        let mut temp = self.temp_file()?;
        temp.write_all(&serialised)
            .context("failed to write storage document")?;
        temp.persist(&self.path)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_document()?.values.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut document = self.read_document()?;
        document.values.insert(key.to_string(), value.to_string());
        document.updated_at = Some(Utc::now());
        self.write_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_overwrites() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("k")?, None);
        store.set("k", "one")?;
        store.set("k", "two")?;
        assert_eq!(store.get("k")?.as_deref(), Some("two"));
        Ok(())
    }

    #[test]
    fn file_store_survives_reopen() -> Result<()> {
        let dir = tempdir()?;
        let data_dir = dir.path().join("nested").join("gamehub");

        let store = FileStore::in_dir(&data_dir);
        assert_eq!(store.get("recentlyPlayed")?, None);
        assert_eq!(store.updated_at()?, None);
        store.set("recentlyPlayed", r#"["3"]"#)?;
        store.set("other", "value")?;
        assert!(store.path().exists());

        let reopened = FileStore::in_dir(&data_dir);
        assert_eq!(reopened.get("recentlyPlayed")?.as_deref(), Some(r#"["3"]"#));
        assert_eq!(reopened.get("other")?.as_deref(), Some("value"));
        assert!(reopened.updated_at()?.is_some());
        Ok(())
    }

    #[test]
    fn corrupt_document_reads_as_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json")?;

        assert_eq!(store.get("recentlyPlayed")?, None);
        store.set("recentlyPlayed", "[]")?;
        assert_eq!(store.get("recentlyPlayed")?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn invalid_utf8_document_is_replaced_on_write() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::in_dir(dir.path());
        fs::write(store.path(), [0xff, 0xfe, 0x00, 0x7b])?;

        assert_eq!(store.get("recentlyPlayed")?, None);
        store.set("recentlyPlayed", r#"["3"]"#)?;
        store.set("recentlyPlayed", r#"["4","3"]"#)?;
        assert_eq!(store.get("recentlyPlayed")?.as_deref(), Some(r#"["4","3"]"#));
        assert!(serde_json::from_slice::<serde_json::Value>(&fs::read(store.path())?).is_ok());
        Ok(())
    }

    #[test]
    fn writable_check_rejects_unusable_directory() -> Result<()> {
        let dir = tempdir()?;
        assert!(FileStore::in_dir(dir.path().join("fresh")).ensure_writable().is_ok());
        assert!(dir.path().join("fresh").is_dir());

        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file")?;
        let store = FileStore::in_dir(blocker.join("gamehub"));
        assert!(store.ensure_writable().is_err());
        assert!(store.set("recentlyPlayed", "[]").is_err());
        Ok(())
    }
}
