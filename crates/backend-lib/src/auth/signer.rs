// ============================
// cyberaware-backend-lib/src/auth/signer.rs
// ============================
//! HMAC-SHA256 signing of cookie payloads.
//!
//! A signed value has the form `<payload>.<mac>`, where `payload` is the
//! base64url-encoded JSON of the value and `mac` is the base64url-encoded
//! HMAC-SHA256 of `payload` under the server secret. Neither part is padded.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Serialize};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of a generated secret key in bytes
pub const GENERATED_KEY_LEN: usize = 32;

/// Signs and verifies cookie values with a server-side secret
#[derive(Clone)]
pub struct CookieSigner {
    key: Vec<u8>,
}

impl CookieSigner {
    /// Create a signer from a secret key
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Create a signer with a random key; values signed by it do not outlive the process
    pub fn generate() -> Self {
        let key: [u8; GENERATED_KEY_LEN] = rand::random();
        Self::new(key.to_vec())
    }

    /// Serialize and sign a value
    pub fn sign<T: Serialize>(&self, value: &T) -> Result<String, AppError> {
        let json = serde_json::to_vec(value)?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    /// Verify a signed value and deserialize it. Returns `None` on any mismatch.
    pub fn verify<T: DeserializeOwned>(&self, signed: &str) -> Option<T> {
        let (payload, signature) = signed.rsplit_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(payload.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AppError::Internal(format!("Invalid signing key: {e}")))
    }
}
