//! File-backed key-value store.
//!
//! All entries live in a single JSON object file, mirroring the flat
//! string-keyed store the login flow writes into. Writes go through a
//! temp file plus rename so a crash mid-write leaves the previous
//! vault intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use vigil_core::error::{AppError, ErrorKind};
use vigil_core::result::AppResult;
use vigil_core::traits::KeyValueStore;

/// File-backed store holding one JSON object.
#[derive(Debug)]
pub struct FileStore {
    /// Path of the vault file.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store at the given path, creating parent directories.
    pub async fn new(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create vault directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the vault file into a map. A missing file is an empty map;
    /// a corrupt file is a serialization error.
    async fn read_map(&self) -> AppResult<BTreeMap<String, String>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read vault file: {}", self.path.display()),
                    e,
                ));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Vault file is not valid JSON: {}", self.path.display()),
                e,
            )
        })
    }

    /// Like [`read_map`](Self::read_map) but recovers from a corrupt
    /// file with an empty map, so a damaged vault can be overwritten by
    /// the next login instead of wedging every write.
    async fn read_map_or_default(&self) -> AppResult<BTreeMap<String, String>> {
        match self.read_map().await {
            Ok(map) => Ok(map),
            Err(e) if e.kind == ErrorKind::Serialization => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt vault file");
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Write the map out atomically: temp file in the same directory,
    /// then rename over the target.
    async fn write_map(&self, map: &BTreeMap<String, String>) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(map)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write vault temp file: {}", tmp_path.display()),
                e,
            )
        })?;

        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace vault file: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), entries = map.len(), "Wrote vault file");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map_or_default().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map_or_default().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove vault file: {}", self.path.display()),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_store(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("session.json")).await.unwrap()
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        store.set("accessToken", "abc.def.ghi").await.unwrap();
        let val = store.get("accessToken").await.unwrap();
        assert_eq!(val, Some("abc.def.ghi".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let store = FileStore::new(&path).await.unwrap();
            store.set("userId", "u-42").await.unwrap();
        }
        let store = FileStore::new(&path).await.unwrap();
        assert_eq!(store.get("userId").await.unwrap(), Some("u-42".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_file_errors_on_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        fs::write(store.path(), b"{ not json").await.unwrap();
        let err = store.get("accessToken").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_set_recovers_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        fs::write(store.path(), b"{ not json").await.unwrap();
        store.set("accessToken", "fresh").await.unwrap();
        assert_eq!(
            store.get("accessToken").await.unwrap(),
            Some("fresh".to_string())
        );
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;
        store.set("a", "1").await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
    }
}
