// ============================
// cyberaware-backend-lib/src/auth/password.rs
// ============================
//! Password complexity policy, hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Characters accepted as "special"
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-+=";

/// Password complexity requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRequirements {
    /// Minimum password length, in characters
    pub min_length: usize,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
    /// Require digits
    pub require_digit: bool,
    /// Require one of `special_characters`
    pub require_special: bool,
    /// The set of characters that count as special
    pub special_characters: String,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            special_characters: SPECIAL_CHARACTERS.to_string(),
        }
    }
}

impl PasswordRequirements {
    /// Notice shown to a user whose password was rejected
    pub fn describe(&self) -> String {
        let classes: Vec<&str> = [
            (self.require_uppercase, "uppercase"),
            (self.require_lowercase, "lowercase"),
            (self.require_digit, "number"),
            (self.require_special, "special character"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect();

        let including = match classes.as_slice() {
            [] => String::new(),
            [only] => format!(", including {only}"),
            [first, second] => format!(", including {first} and {second}"),
            [rest @ .., last] => format!(", including {}, and {last}", rest.join(", ")),
        };
        format!(
            "Password must be at least {} characters long{including}.",
            self.min_length
        )
    }
}

/// Decimal digits in any script, plus other digit characters such as
/// superscripts. Letter-like numerals (`Ⅻ`) do not count.
fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || (c.is_numeric() && !c.is_alphabetic())
}

/// Check a password against the default requirements
pub fn is_valid_password(password: &str) -> bool {
    validate_password_strength(password, &PasswordRequirements::default())
}

/// Check if a password meets the complexity requirements
pub fn validate_password_strength(password: &str, requirements: &PasswordRequirements) -> bool {
    if password.chars().count() < requirements.min_length {
        return false;
    }

    if requirements.require_uppercase && !password.chars().any(char::is_uppercase) {
        return false;
    }

    if requirements.require_lowercase && !password.chars().any(char::is_lowercase) {
        return false;
    }

    if requirements.require_digit && !password.chars().any(is_digit) {
        return false;
    }

    if requirements.require_special
        && !password
            .chars()
            .any(|c| requirements.special_characters.contains(c))
    {
        return false;
    }

    true
}

/// Hash a password using scrypt with a fresh random salt
pub fn hash_password(plain: &str, params: &Params) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, *params, &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a PHC-encoded hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, params: &Params) -> anyhow::Result<String> {
    let hash = hash_password(plain, params);
    plain.zeroize();
    hash
}
