//! JSON file store
//!
//! Holds all keys in memory and rewrites a single JSON file on every mutation.
//! This is the on-disk stand-in for browser local storage: values are opaque
//! strings, and the whole file is replaced on each write.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;

use super::{KeyValueStore, errors::StoreError};
use crate::Result;

/// The current file format version.
const FILE_FORMAT_VERSION: u8 = 0;

fn is_v0(v: &u8) -> bool {
    *v == 0
}

fn validate_file_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != FILE_FORMAT_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported store file version {version}; only version {FILE_FORMAT_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// On-disk layout of a [`JsonFile`] store.
#[derive(Serialize, Deserialize, Default)]
struct StoreFile {
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_file_version"
    )]
    version: u8,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// A key-value store persisted to one JSON file.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonFile {
    /// Opens the store at `path`.
    ///
    /// If the file does not exist, an empty store is returned and the file is
    /// created on the first write.
    ///
    /// # Errors
    /// Returns [`StoreError::FileIo`] if the file exists but cannot be read, and
    /// [`StoreError::DeserializationFailed`] if it is not a valid store file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match tokio::fs::read_to_string(&path).await {
            Ok(json) => {
                let file: StoreFile = serde_json::from_str(&json).map_err(|source| {
                    StoreError::DeserializationFailed {
                        path: path.clone(),
                        source,
                    }
                })?;
                tracing::debug!(path = %path.display(), keys = file.entries.len(), "loaded store file");
                file.entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => {
                return Err(StoreError::FileIo {
                    path: path.clone(),
                    source,
                }
                .into());
            }
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Creates an empty store at `path` without reading it.
    ///
    /// Whatever the file holds is replaced on the first write. Hosts use this to
    /// start fresh when [`JsonFile::open`] rejects an unreadable file.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `values` to the backing file, replacing it.
    async fn flush(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let file = StoreFile {
            version: FILE_FORMAT_VERSION,
            entries: values.clone(),
        };
        let json =
            serde_json::to_string_pretty(&file).map_err(|source| StoreError::SerializationFailed {
                what: self.path.display().to_string(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::FileIo {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::FileIo {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), keys = values.len(), "wrote store file");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFile {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self.values.write().await;
        let previous = values.insert(key.to_string(), value);
        if let Err(e) = self.flush(&values).await {
            // Keep memory in step with the file.
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().await;
        let Some(previous) = values.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush(&values).await {
            values.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.values.read().await.keys().cloned().collect())
    }
}
