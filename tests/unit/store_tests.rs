use std::sync::Arc;

use cyberaware_backend_lib::auth::{hash_password, AuthService, Credentials, PasswordRequirements};
use cyberaware_backend_lib::error::AppError;
use cyberaware_backend_lib::storage::{CredentialStore, MemoryCredentialStore};
use scrypt::Params;
use tokio::task::JoinSet;

fn params() -> Params {
    Params::new(4, 8, 1, Params::RECOMMENDED_LEN).unwrap()
}

#[tokio::test]
async fn test_store_verify_follows_stored_hash() {
    let store = MemoryCredentialStore::new();
    store
        .register("alice", hash_password("Abcdef1!2345", &params()).unwrap())
        .await;

    assert!(store.exists("alice").await);
    assert!(store.verify("alice", "Abcdef1!2345").await);
    assert!(!store.verify("alice", "abcdef1!2345").await);
    assert!(!store.verify("mallory", "Abcdef1!2345").await);
}

#[tokio::test]
async fn test_concurrent_raw_registrations_keep_one_entry() {
    // Last writer wins; the map itself stays consistent
    let store = MemoryCredentialStore::new();
    let passwords = ["Abcdef1!2345", "Zzzzzz9!0000", "Qwerty7!8901"];

    let mut tasks = JoinSet::new();
    for password in passwords {
        let store = store.clone();
        tasks.spawn(async move {
            let hash = hash_password(password, &params()).unwrap();
            store.register("alice", hash).await;
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    assert_eq!(store.len(), 1);
    let mut matching = 0;
    for password in passwords {
        if store.verify("alice", password).await {
            matching += 1;
        }
    }
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn test_auth_service_shares_store_handle() {
    let store = MemoryCredentialStore::new();
    let auth = Arc::new(AuthService::new(
        store.clone(),
        PasswordRequirements::default(),
        params(),
    ));

    auth.register(Credentials::new("alice", "Abcdef1!2345"))
        .await
        .unwrap();
    assert!(store.exists("alice").await);

    let result = auth.register(Credentials::new("alice", "Zzzzzz9!0000")).await;
    assert!(matches!(result, Err(AppError::UsernameTaken(_))));
    assert!(store.verify("alice", "Abcdef1!2345").await);
}
