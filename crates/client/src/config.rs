//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOUQ_API_BASE_URL` - Base URL of the Souq REST API (e.g., `https://api.souq.example/api`)
//!
//! ## Optional
//! - `SOUQ_REFRESH_PATH` - Token refresh endpoint (default: `/admin/refresh-token`)
//! - `SOUQ_LOGIN_PATH` - Login route used on terminal auth failure (default: `/admin`)
//! - `SOUQ_CSRF_COOKIE` - Name of the readable CSRF cookie (default: `csrf_token`)
//! - `SOUQ_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `SOUQ_CART_DIR` - Directory for the durable cart record (default: `.souq`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default token refresh endpoint.
const DEFAULT_REFRESH_PATH: &str = "/admin/refresh-token";
/// Default login route for terminal auth failures.
const DEFAULT_LOGIN_PATH: &str = "/admin";
/// Default name of the readable CSRF cookie.
const DEFAULT_CSRF_COOKIE: &str = "csrf_token";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API; endpoint paths are joined onto it.
    pub base_url: Url,
    /// Path of the silent token-refresh endpoint.
    pub refresh_path: String,
    /// Login route the session-expired handler is pointed at.
    pub login_path: String,
    /// Name of the readable cookie echoed as `x-csrf-token`.
    pub csrf_cookie: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Directory holding the durable cart record.
    pub cart_dir: PathBuf,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cart_dir: PathBuf::from(".souq"),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SOUQ_API_BASE_URL` is missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::read_env()
    }

    /// Read configuration from the process environment as-is.
    fn read_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("SOUQ_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SOUQ_API_BASE_URL".to_string(), e.to_string())
            })?;
        let timeout_secs = get_env_or_default(
            "SOUQ_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SOUQ_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url,
            refresh_path: get_env_or_default("SOUQ_REFRESH_PATH", DEFAULT_REFRESH_PATH),
            login_path: get_env_or_default("SOUQ_LOGIN_PATH", DEFAULT_LOGIN_PATH),
            csrf_cookie: get_env_or_default("SOUQ_CSRF_COOKIE", DEFAULT_CSRF_COOKIE),
            timeout: Duration::from_secs(timeout_secs),
            cart_dir: PathBuf::from(get_env_or_default("SOUQ_CART_DIR", ".souq")),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
