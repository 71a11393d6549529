// ============================
// cyberaware-backend-lib/src/storage.rs
// ============================
//! Credential storage abstraction with an in-memory implementation.
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::auth::verify_password;

/// Trait for credential storage backends
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Whether a user with this name is registered
    async fn exists(&self, username: &str) -> bool;

    /// Store a password hash for `username`.
    ///
    /// Inserts unconditionally; callers check [`CredentialStore::exists`] first.
    /// The check and the insert are not atomic, so two concurrent
    /// registrations of the same name race and the last writer wins.
    async fn register(&self, username: &str, password_hash: String);

    /// Whether `username` exists and `password` matches its stored hash
    async fn verify(&self, username: &str, password: &str) -> bool;
}

/// In-memory credential store. Contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<DashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored hash for `username`
    pub fn password_hash(&self, username: &str) -> Option<String> {
        self.users.get(username).map(|entry| entry.value().clone())
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    async fn register(&self, username: &str, password_hash: String) {
        self.users.insert(username.to_string(), password_hash);
    }

    async fn verify(&self, username: &str, password: &str) -> bool {
        // Clone the hash out so no map guard is held across the await
        let Some(hash) = self.password_hash(username) else {
            return false;
        };
        let password = password.to_string();

        match tokio::task::spawn_blocking(move || verify_password(&hash, &password)).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Password verification task failed: {e}");
                false
            },
        }
    }
}
