// ============================
// cyberaware-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::PasswordRequirements;
use crate::error::AppError;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Prefix for environment overrides, e.g. `CYBERAWARE_BIND_ADDR`
pub const ENV_PREFIX: &str = "CYBERAWARE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Default scrypt cost: N = 2^15 (32 MiB per hash with r = 8)
pub const DEFAULT_HASH_LOG_N: u8 = 15;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Secret used to sign cookies. A random one is generated when absent.
    pub secret_key: Option<String>,
    /// Cookie settings
    pub cookie: CookieSettings,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
    /// Password hashing cost
    pub hashing: HashingSettings,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Cookie settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieSettings {
    /// Name of the session cookie
    pub session_name: String,
    /// Name of the flash notice cookie
    pub flash_name: String,
    /// Add the `Secure` attribute
    pub secure: bool,
}

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingSettings {
    /// CPU/memory cost as a power of two
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            secret_key: None,
            cookie: CookieSettings::default(),
            password_requirements: PasswordRequirements::default(),
            hashing: HashingSettings::default(),
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            session_name: "session".to_string(),
            flash_name: "flash".to_string(),
            secure: false,
        }
    }
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            log_n: DEFAULT_HASH_LOG_N,
            r: scrypt::Params::RECOMMENDED_R,
            p: scrypt::Params::RECOMMENDED_P,
        }
    }
}

impl HashingSettings {
    /// Convert into scrypt parameters
    pub fn params(&self) -> Result<scrypt::Params, AppError> {
        scrypt::Params::new(self.log_n, self.r, self.p, scrypt::Params::RECOMMENDED_LEN)
            .map_err(|e| AppError::Config(format!("Invalid hashing parameters: {e}")))
    }
}

impl Settings {
    /// Load settings from the default config file and the environment
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load settings from a TOML file (optional) and `CYBERAWARE_*` environment variables.
    /// Nested keys use `__`, e.g. `CYBERAWARE_HASHING__LOG_N=10`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let settings: Settings = Self::figment(path.as_ref()).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), AppError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log level '{}', expected one of {LOG_LEVELS:?}",
                self.log_level
            )));
        }

        if let Some(secret) = &self.secret_key {
            if secret.len() < 16 {
                return Err(AppError::Config(
                    "secret_key must be at least 16 bytes".to_string(),
                ));
            }
        }

        if self.cookie.session_name.is_empty()
            || self.cookie.flash_name.is_empty()
            || self.cookie.session_name == self.cookie.flash_name
        {
            return Err(AppError::Config(
                "Cookie names must be non-empty and distinct".to_string(),
            ));
        }

        let requirements = &self.password_requirements;
        if requirements.min_length < 8 {
            return Err(AppError::Config(
                "password_requirements.min_length must be at least 8".to_string(),
            ));
        }
        if requirements.require_special && requirements.special_characters.is_empty() {
            return Err(AppError::Config(
                "password_requirements.special_characters must not be empty".to_string(),
            ));
        }

        self.hashing.params()?;
        Ok(())
    }
}
