// =============
// cyberaware-backend-lib/src/auth/service.rs
// =============
//! Registration and login workflows over a [`CredentialStore`].
use scrypt::Params;
use zeroize::Zeroize;

use super::password::{hash_password_secure, validate_password_strength, PasswordRequirements};
use crate::error::AppError;
use crate::metrics::{AUTH_LOGIN_FAILURE, AUTH_LOGIN_SUCCESS, AUTH_REGISTER_REJECTED, AUTH_REGISTER_SUCCESS};
use crate::storage::CredentialStore;

/// A username/password pair submitted through a form.
/// The password is wiped from memory when the value is dropped.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    store: S,
    requirements: PasswordRequirements,
    params: Params,
}

impl<S: CredentialStore + Clone + 'static> AuthService<S> {
    pub fn new(store: S, requirements: PasswordRequirements, params: Params) -> Self {
        Self {
            store,
            requirements,
            params,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn requirements(&self) -> &PasswordRequirements {
        &self.requirements
    }

    /// Register a new user.
    ///
    /// Fails with [`AppError::UsernameTaken`] if the name is already present,
    /// then with [`AppError::WeakPassword`] if the password fails the policy.
    /// Neither failure changes the store.
    pub async fn register(&self, credentials: Credentials) -> Result<(), AppError> {
        if self.store.exists(&credentials.username).await {
            metrics::counter!(AUTH_REGISTER_REJECTED).increment(1);
            return Err(AppError::UsernameTaken(credentials.username.clone()));
        }

        if !validate_password_strength(&credentials.password, &self.requirements) {
            metrics::counter!(AUTH_REGISTER_REJECTED).increment(1);
            return Err(AppError::WeakPassword);
        }

        let mut password = credentials.password.clone();
        let params = self.params;
        let hash = tokio::task::spawn_blocking(move || hash_password_secure(&mut password, &params))
            .await?
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;

        self.store.register(&credentials.username, hash).await;
        metrics::counter!(AUTH_REGISTER_SUCCESS).increment(1);
        tracing::info!(username = %credentials.username, "user registered");
        Ok(())
    }

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AppError::InvalidCredentials`].
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<(), AppError> {
        if self
            .store
            .verify(&credentials.username, &credentials.password)
            .await
        {
            metrics::counter!(AUTH_LOGIN_SUCCESS).increment(1);
            tracing::info!(username = %credentials.username, "login succeeded");
            Ok(())
        } else {
            metrics::counter!(AUTH_LOGIN_FAILURE).increment(1);
            tracing::info!(username = %credentials.username, "login rejected");
            Err(AppError::InvalidCredentials)
        }
    }
}
