//! Persistence tests: reload the directory from the same store

use std::sync::Arc;

use healthconnect::{
    AccountDirectory,
    constants::{ACCOUNTS_KEY, SESSION_KEY},
    store::KeyValueStore,
};

use crate::helpers::*;

#[tokio::test]
async fn test_reload_reproduces_accounts_and_session() {
    let (directory, store) = test_directory().await;
    register(&directory, "Asha", "asha@example.com", "secret12").await;
    register(&directory, "Ben", "ben@example.com", "secret34").await;
    register(&directory, "Chen", "chen@example.com", "secret56").await;
    directory.login("ben", "secret34").await.unwrap();

    let reloaded = open_directory(store.clone()).await;

    assert_eq!(reloaded.accounts().await, directory.accounts().await);
    assert_eq!(
        reloaded.current_session().await,
        directory.current_session().await
    );
    let emails: Vec<String> = reloaded
        .accounts()
        .await
        .into_iter()
        .map(|a| a.email)
        .collect();
    assert_eq!(
        emails,
        vec!["asha@example.com", "ben@example.com", "chen@example.com"]
    );
}

#[tokio::test]
async fn test_reloaded_directory_accepts_login() {
    let (directory, store, _) = test_directory_with_account("a@b.com", "secret12").await;
    drop(directory);

    let reloaded = AccountDirectory::open(store).await;
    assert!(!reloaded.is_authenticated().await);
    reloaded.login("a@b.com", "secret12").await.unwrap();
}

#[tokio::test]
async fn test_logout_survives_reload() {
    let (directory, store, _) = test_directory_with_account("a@b.com", "secret12").await;
    directory.login("a@b.com", "secret12").await.unwrap();
    directory.logout().await.unwrap();

    let reloaded = open_directory(store).await;
    assert!(!reloaded.is_authenticated().await);
}

#[tokio::test]
async fn test_uniqueness_enforced_after_reload() {
    let (directory, store, _) = test_directory_with_account("a@b.com", "secret12").await;
    drop(directory);

    let reloaded = open_directory(store).await;
    assert!(reloaded.email_exists("A@B.com").await);
    assert!(
        reloaded
            .register_account("Again", "a@b.com", "secret12", "secret12")
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_stored_layout() {
    let (directory, store, account) =
        test_directory_with_account("Asha@Example.com", "secret12").await;
    directory.login("asha", "secret12").await.unwrap();

    let accounts: serde_json::Value =
        serde_json::from_str(&store.get(ACCOUNTS_KEY).await.unwrap().unwrap()).unwrap();
    assert_eq!(
        accounts,
        serde_json::json!([{
            "id": account.id,
            "name": "Test User",
            "email": "asha@example.com",
            "username": "asha",
            "passwordHash": account.password_hash,
            "createdAt": "2024-01-01T00:00:00.000Z",
        }])
    );

    let session: serde_json::Value =
        serde_json::from_str(&store.get(SESSION_KEY).await.unwrap().unwrap()).unwrap();
    assert_eq!(
        session,
        serde_json::json!({
            "id": account.id,
            "name": "Test User",
            "email": "asha@example.com",
            "username": "asha",
            "loginTime": "2024-01-01T00:00:00.000Z",
        })
    );
}

#[tokio::test]
async fn test_corrupt_records_start_empty() {
    let store = test_store();
    store
        .set(ACCOUNTS_KEY, "this is not json".to_string())
        .await
        .unwrap();
    store
        .set(SESSION_KEY, r#"{"id": 5}"#.to_string())
        .await
        .unwrap();

    let directory = open_directory(store.clone()).await;
    assert!(directory.is_empty().await);
    assert!(!directory.is_authenticated().await);

    // The first write replaces the corrupt snapshot
    register(&directory, "Asha", "asha@example.com", "secret12").await;
    let reloaded = open_directory(Arc::clone(&store) as Arc<dyn KeyValueStore>).await;
    assert_eq!(reloaded.len().await, 1);
}

#[tokio::test]
async fn test_front_end_records_survive_signup() {
    let store = test_store();
    let front_end = serde_json::json!([
        {
            "id": "1704067200000",
            "name": "Asha Rao",
            "email": "asha@example.com",
            "username": "asha",
            "password": "secret12",
            "createdAt": "2024-01-01T00:00:00.000Z"
        },
        { "name": "half a record" }
    ]);
    store
        .set(ACCOUNTS_KEY, front_end.to_string())
        .await
        .unwrap();

    let directory = open_directory(store.clone()).await;
    assert_eq!(directory.len().await, 1);
    register(&directory, "Ben", "ben@example.com", "secret34").await;

    let reloaded = open_directory(store.clone()).await;
    assert_eq!(reloaded.len().await, 2);
    let session = reloaded.login("asha@example.com", "secret12").await.unwrap();
    assert_eq!(session.id, "1704067200000");

    let raw = store.get(ACCOUNTS_KEY).await.unwrap().unwrap();
    assert!(!raw.contains("secret12"));
}
