//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MYCART_DATA_DIR` - Directory holding the local storage records (default: `.mycart`)
//! - `MYCART_CATALOG_PATH` - JSON catalog file to load instead of the built-in sample
//! - `MYCART_INVENTORY_POLICY` - `enforce` or `permissive` (default: `enforce`)
//! - `MYCART_AUTH_DELAY_MS` - Artificial delay for mock sign-in, in milliseconds (default: 500)
//! - `MYCART_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::cart::InventoryPolicy;

const DEFAULT_DATA_DIR: &str = ".mycart";
const DEFAULT_AUTH_DELAY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed local storage
    pub data_dir: PathBuf,
    /// Optional catalog file; `None` uses the built-in sample catalog
    pub catalog_path: Option<PathBuf>,
    /// Whether the cart caps quantities at product inventory
    pub inventory_policy: InventoryPolicy,
    /// Cosmetic delay applied to mock identity operations
    pub auth_delay: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            inventory_policy: InventoryPolicy::default(),
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            log_format: LogFormat::default(),
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("MYCART_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = lookup("MYCART_CATALOG_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let inventory_policy = parse_or_default(&lookup, "MYCART_INVENTORY_POLICY")?;
        let auth_delay_ms = parse_or(&lookup, "MYCART_AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS)?;
        let log_format = parse_or_default(&lookup, "MYCART_LOG_FORMAT")?;

        Ok(Self {
            data_dir,
            catalog_path,
            inventory_policy,
            auth_delay: Duration::from_millis(auth_delay_ms),
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, otherwise fall back to `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn parse_or_default<F, T>(lookup: &F, key: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default,
    T::Err: ToString,
{
    parse_or(lookup, key, T::default())
}
