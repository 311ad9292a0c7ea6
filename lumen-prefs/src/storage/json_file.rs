use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::PreferenceStorage;
use crate::error::StorageError;

/// Stores all preferences as one flat JSON object, e.g. `{"ui.darkMode": "true"}`.
///
/// The file is read lazily on first access and replaced on every write by
/// renaming a fully written sibling file over it, so a crash mid-write leaves the
/// previous content intact. A file that does not exist yet is treated as an
/// empty store.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    cache: Mutex<Option<BTreeMap<String, String>>>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cache: Mutex::new(None) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }

    async fn read_file(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Preferences file {:?} does not exist yet; starting empty.", self.path);
                Ok(BTreeMap::new())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write_file(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
            }
        }
        let content = serde_json::to_string_pretty(values)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, content).await.map_err(|e| self.io_error(e))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(self.io_error(e));
        }
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PreferenceStorage for JsonFileStorage {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.read_file().await?);
        }
        Ok(cache.as_ref().and_then(|values| values.get(key).cloned()))
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cache = self.cache.lock().await;
        let mut values = match cache.as_ref() {
            Some(values) => values.clone(),
            None => self.read_file().await?,
        };
        values.insert(key.to_string(), value.to_string());
        // The cache only ever holds what is on disk.
        self.write_file(&values).await?;
        *cache = Some(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp.path().join("missing.json"));
        assert_eq!(storage.get_value("ui.darkMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/preferences.json");

        let first = JsonFileStorage::new(&path);
        first.set_value("ui.darkMode", "false").await.unwrap();
        first.set_value("memory.refLimit", "250").await.unwrap();

        let second = JsonFileStorage::new(&path);
        assert_eq!(second.get_value("ui.darkMode").await.unwrap().as_deref(), Some("false"));
        assert_eq!(second.get_value("memory.refLimit").await.unwrap().as_deref(), Some("250"));

        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
    }

    #[tokio::test]
    async fn test_write_leaves_no_staging_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.json");
        let storage = JsonFileStorage::new(&path);
        storage.set_value("verboseLogging", "true").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("preferences.json")]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_value() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("store");
        let path = dir.join("preferences.json");
        let storage = JsonFileStorage::new(&path);
        storage.set_value("memory.refLimit", "100").await.unwrap();

        // Replace the store's directory with a plain file so the next write fails.
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        let result = storage.set_value("memory.refLimit", "200").await;
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert_eq!(storage.get_value("memory.refLimit").await.unwrap().as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_corrupted_file_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = JsonFileStorage::new(&path);
        let result = storage.get_value("ui.darkMode").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error() {
        let temp = TempDir::new().unwrap();
        // The temp dir itself cannot be read as a file.
        let storage = JsonFileStorage::new(temp.path());
        let result = storage.get_value("ui.darkMode").await;
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }
}
