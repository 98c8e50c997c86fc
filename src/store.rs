//! Durable key-value storage.
//!
//! The localization service only needs string values under string keys, a way
//! to enumerate keys and a way to wipe everything. `KeyValueStore` is that
//! seam; `MemoryStore` backs tests and ephemeral sessions, `FileStore` keeps
//! values across restarts in a single JSON document.

use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Key holding the language saved after every successful change.
pub const CURRENT_LANGUAGE_KEY: &str = "current_language";

/// Key holding an explicitly pinned language.
pub const LANGUAGE_OVERRIDE_KEY: &str = "language_override";

/// Prefix of the keys mirroring cached translation tables.
pub const CACHE_KEY_PREFIX: &str = "lang_cache_";

/// Store key for the mirrored table of a language code.
pub fn cache_key(code: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, code)
}

/// Opaque persisted string storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key visible to this store.
    async fn clear(&self) -> Result<(), StoreError>;

    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

// ==================== In-memory store ====================

/// Process-local store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// ==================== File-backed store ====================

type Namespaces = BTreeMap<String, BTreeMap<String, String>>;

/// JSON-file store scoped to a namespace.
///
/// The file holds `{"<namespace>": {"<key>": "<value>"}}`. Several namespaces
/// can share one file; each `FileStore` reads and clears only its own. A
/// missing file reads as empty and is created on first write. Every write
/// replaces the whole document through a sibling temp file and a rename, so a
/// crash mid-write leaves the previous document in place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    namespace: String,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }

    async fn load(&self) -> Result<Namespaces, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Namespaces::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Namespaces::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn save(&self, namespaces: &Namespaces) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let contents = serde_json::to_string_pretty(namespaces)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, contents)
            .await
            .map_err(|source| StoreError::Io {
                path: staging.clone(),
                source,
            })?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!("Wrote store file {}", self.path.display());
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let namespaces = self.load().await?;
        Ok(namespaces
            .get(&self.namespace)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut namespaces = self.load().await?;
        namespaces
            .entry(self.namespace.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.save(&namespaces).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut namespaces = self.load().await?;
        let removed = namespaces
            .get_mut(&self.namespace)
            .and_then(|entries| entries.remove(key))
            .is_some();
        if removed {
            self.save(&namespaces).await?;
        }
        Ok(())
    }

    /// Unreadable JSON counts as an empty document here, so clearing is also
    /// how a damaged file gets replaced. Other namespaces in it are lost.
    async fn clear(&self) -> Result<(), StoreError> {
        let mut namespaces = match self.load().await {
            Ok(namespaces) => namespaces,
            Err(StoreError::Serialization(e)) => {
                warn!(
                    "Store file {} is corrupt, rewriting it: {}",
                    self.path.display(),
                    e
                );
                return self.save(&Namespaces::new()).await;
            }
            Err(e) => return Err(e),
        };
        if namespaces.remove(&self.namespace).is_some() {
            self.save(&namespaces).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let namespaces = self.load().await?;
        Ok(namespaces
            .get(&self.namespace)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }
}
