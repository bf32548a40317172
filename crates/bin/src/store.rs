//! Store creation for the CLI.

use std::{path::PathBuf, sync::Arc};

use healthconnect::store::{InMemory, JsonFile, KeyValueStore};

use crate::cli::{Cli, StoreKind};

/// File name of the JSON store inside the data directory.
pub const STORE_FILE: &str = "healthconnect.json";

/// Create the store selected on the command line.
///
/// An unreadable store file is not fatal: it is logged and replaced by an
/// empty store, which overwrites it on the next write.
pub async fn open_store(cli: &Cli) -> Result<Arc<dyn KeyValueStore>, Box<dyn std::error::Error>> {
    match cli.store {
        StoreKind::Json => {
            let data_dir = cli.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            tokio::fs::create_dir_all(&data_dir).await?;

            let path = data_dir.join(STORE_FILE);
            match JsonFile::open(&path).await {
                Ok(store) => {
                    tracing::debug!("Using JSON store at {}", path.display());
                    Ok(Arc::new(store))
                }
                Err(e) if e.is_store_error() => {
                    tracing::warn!("Failed to load {}: {e}. Starting fresh.", path.display());
                    Ok(Arc::new(JsonFile::empty(&path)))
                }
                Err(e) => Err(e.into()),
            }
        }
        StoreKind::Inmemory => {
            tracing::info!("Using in-memory store; nothing will be saved");
            Ok(Arc::new(InMemory::new()))
        }
    }
}
