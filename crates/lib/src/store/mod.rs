//! Key-value stores for HealthConnect state
//!
//! This module provides the [`KeyValueStore`] trait and its implementations.
//!
//! A store maps string keys to string values, the same shape as browser local
//! storage. Callers always read and write whole values: there are no partial
//! updates and no transactions. The account directory keeps two keys in it, see
//! [`crate::constants`].

use std::fmt::Debug;

use async_trait::async_trait;

use crate::Result;

pub mod errors;
pub mod in_memory;
pub mod json_file;

pub use errors::StoreError;
pub use in_memory::InMemory;
pub use json_file::JsonFile;

/// Storage trait abstracting where HealthConnect records live.
///
/// Implementations must be `Send` and `Sync` so a single store can back a
/// directory shared across tasks.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key currently present, in sorted order.
    async fn keys(&self) -> Result<Vec<String>>;
}
