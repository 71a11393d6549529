// ============================
// cyberaware-backend-lib/src/lib.rs
// ============================
//! Core functionality for the Cyber Awareness web site: credential storage,
//! signed-cookie sessions, the auth gate and the page handlers.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod storage;

use std::sync::Arc;

use crate::auth::{AuthService, CookieSigner};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::CredentialStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Authentication service over the credential store
    pub auth: AuthService<S>,
    /// Signs and verifies session and flash cookies
    pub signer: CookieSigner,
    /// Settings
    pub settings: Arc<Settings>,
}

impl<S: CredentialStore + Clone + 'static> AppState<S> {
    /// Create a new application state
    pub fn new(store: S, config: &Settings) -> Result<Self, AppError> {
        config.validate()?;

        let signer = match &config.secret_key {
            Some(secret) => CookieSigner::new(secret.as_bytes().to_vec()),
            None => {
                tracing::warn!(
                    "no secret_key configured, using a random one; sessions will not survive a restart"
                );
                CookieSigner::generate()
            },
        };

        let auth = AuthService::new(
            store,
            config.password_requirements.clone(),
            config.hashing.params()?,
        );

        Ok(Self {
            auth,
            signer,
            settings: Arc::new(config.clone()),
        })
    }
}
