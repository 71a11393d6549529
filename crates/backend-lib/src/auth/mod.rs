// ============================
// cyberaware-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod session;
pub mod signer;
mod service;

pub use password::{
    hash_password, is_valid_password, validate_password_strength, verify_password,
    PasswordRequirements, MIN_PASSWORD_LENGTH, SPECIAL_CHARACTERS,
};
pub use service::{AuthService, Credentials};
pub use session::Session;
pub use signer::CookieSigner;
