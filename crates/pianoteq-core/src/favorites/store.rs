//! Key-value stores for string lists.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::FavoritesError;

/// Minimal key-value store holding lists of strings.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// List stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>, FavoritesError>;

    /// Replace the list stored under `key`.
    async fn set(&self, key: &str, values: Vec<String>) -> Result<(), FavoritesError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>, FavoritesError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, values: Vec<String>) -> Result<(), FavoritesError> {
        self.entries.lock().await.insert(key.to_string(), values);
        Ok(())
    }
}

/// Store backed by one JSON file mapping keys to lists.
///
/// A missing file reads as empty. Writes go through a temporary file and a
/// rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store at `path`. Nothing is touched until first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// File backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, Vec<String>>, FavoritesError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FavoritesStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>, FavoritesError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, values: Vec<String>) -> Result<(), FavoritesError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), values);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
