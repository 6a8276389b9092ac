//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory holding persisted carts (default: .medmart)
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: cart)
//! - `CART_STORAGE_QUOTA_BYTES` - Largest cart blob accepted by storage
//! - `AUTH_COOKIE_NAME` - Name of the session cookie (default: `mm_session`)

use std::path::PathBuf;

use thiserror::Error;

use crate::session::DEFAULT_COOKIE_NAME;
use crate::storage::{DEFAULT_CART_KEY, FileStorage, validate_key};

const DEFAULT_STORAGE_DIR: &str = ".medmart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Cart persistence settings
    pub storage: CartStorageConfig,
    /// Name of the cookie carrying the auth session
    pub auth_cookie_name: String,
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStorageConfig {
    /// Directory for [`FileStorage`]
    pub dir: PathBuf,
    /// Key the cart is stored under
    pub key: String,
    /// Maximum blob size in bytes
    pub quota_bytes: Option<usize>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: CartStorageConfig::default(),
            auth_cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }
}

impl Default for CartStorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            key: DEFAULT_CART_KEY.to_string(),
            quota_bytes: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = CartStorageConfig::from_lookup(&lookup)?;
        let auth_cookie_name = lookup("AUTH_COOKIE_NAME")
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        if auth_cookie_name.is_empty() || auth_cookie_name.contains([';', '=', ' ']) {
            return Err(ConfigError::InvalidEnvVar(
                "AUTH_COOKIE_NAME".to_string(),
                format!("not a valid cookie name: {auth_cookie_name:?}"),
            ));
        }

        Ok(Self {
            storage,
            auth_cookie_name,
        })
    }
}

impl CartStorageConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dir = lookup("CART_STORAGE_DIR")
            .filter(|d| !d.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let key = lookup("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_key(&key).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let quota_bytes = lookup("CART_STORAGE_QUOTA_BYTES")
            .map(|q| {
                q.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("CART_STORAGE_QUOTA_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            dir,
            key,
            quota_bytes,
        })
    }

    /// Build the file storage backend described by this config.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.dir).with_quota(self.quota_bytes)
    }
}
