//! In-memory store
//!
//! Keeps every key in a sorted map behind an async lock. Nothing survives the
//! process; use [`JsonFile`](super::JsonFile) for that.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::Result;

/// A simple in-memory key-value store.
#[derive(Debug, Default)]
pub struct InMemory {
    values: RwLock<BTreeMap<String, String>>,
}

impl InMemory {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Returns a copy of every key and value currently held.
    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.read().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for InMemory {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.values.read().await.keys().cloned().collect())
    }
}
