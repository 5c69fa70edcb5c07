//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is owned by the application state and handed to
//! handlers and middleware through axum's `State` extractor; there is no
//! process-wide configuration singleton.
//!
//! ```rust,no_run
//! use lib_core::config::Config;
//!
//! let config = Config::from_env().and_then(|c| c.validate().map(|_| c))?;
//! println!("Tokens live for {}h", config.jwt_expiration_hours);
//! # Ok::<(), lib_core::AppError>(())
//! ```

use crate::error::{AppError, Result};
use lib_utils::envs::{get_env, get_env_or, get_env_parse_or};

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/blog.db";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Upper bound on the time spent serving a single request, in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 1)
            .map_err(|e| AppError::Config(e.to_string()))?;

        let request_timeout_secs = get_env_parse_or("REQUEST_TIMEOUT_SECS", 30)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            request_timeout_secs,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        if self.request_timeout_secs < 1 || self.request_timeout_secs > 300 {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        Ok(())
    }
}
