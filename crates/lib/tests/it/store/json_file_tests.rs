//! JsonFile store driven through the account directory

use std::{fs, sync::Arc};

use healthconnect::{
    AccountDirectory,
    constants::{ACCOUNTS_KEY, SESSION_KEY},
    store::{JsonFile, KeyValueStore, StoreError},
};
use tempfile::TempDir;

use crate::helpers::*;

async fn open_file_directory(dir: &TempDir) -> (AccountDirectory, Arc<JsonFile>) {
    let store = Arc::new(
        JsonFile::open(dir.path().join("healthconnect.json"))
            .await
            .expect("Failed to open store file"),
    );
    (open_directory(store.clone()).await, store)
}

#[tokio::test]
async fn test_directory_survives_restart() {
    let dir = TempDir::new().unwrap();

    let (account, session) = {
        let (directory, _) = open_file_directory(&dir).await;
        let account = register(&directory, "Asha", "asha@example.com", "secret12").await;
        let session = directory.login("asha", "secret12").await.unwrap();
        (account, session)
    };

    let (directory, store) = open_file_directory(&dir).await;
    assert_eq!(directory.accounts().await, vec![account]);
    assert_eq!(directory.current_session().await, Some(session));
    assert_eq!(store.keys().await.unwrap(), vec![SESSION_KEY, ACCOUNTS_KEY]);
}

#[tokio::test]
async fn test_logout_removes_session_from_file() {
    let dir = TempDir::new().unwrap();
    let (directory, store) = open_file_directory(&dir).await;
    register(&directory, "Asha", "asha@example.com", "secret12").await;
    directory.login("asha", "secret12").await.unwrap();
    directory.logout().await.unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains(ACCOUNTS_KEY));
    assert!(!raw.contains(SESSION_KEY));
}

#[tokio::test]
async fn test_plain_password_never_written() {
    let dir = TempDir::new().unwrap();
    let (directory, store) = open_file_directory(&dir).await;
    register(&directory, "Asha", "asha@example.com", "plaintext-secret").await;
    directory.login("asha", "plaintext-secret").await.unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(!raw.contains("plaintext-secret"));
}

#[tokio::test]
async fn test_corrupt_file_is_an_open_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("healthconnect.json");
    fs::write(&path, "{ definitely not json").unwrap();

    let err = JsonFile::open(&path).await.unwrap_err();
    assert!(err.is_store_error());
    assert!(matches!(
        err,
        healthconnect::Error::Store(StoreError::DeserializationFailed { .. })
    ));
}

#[tokio::test]
async fn test_corrupt_value_inside_valid_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("healthconnect.json");
    fs::write(
        &path,
        r#"{"entries": {"healthconnect_users": "[{\"broken\": true}]"}}"#,
    )
    .unwrap();

    let (directory, _) = open_file_directory(&dir).await;
    assert!(directory.is_empty().await);
}
