//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session issuance configuration
//! - `database` - Database connection and pool configuration
//! - `email` - Transactional email provider configuration
//! - `environment` - Environment detection
//! - `rate_limit` - Fixed-window rate limiting for OTP resend
//! - `server` - HTTP server configuration
//! - `sweeper` - Background cleanup of expired verification codes

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sweeper;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::Environment;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use sweeper::SweeperConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session issuance configuration
    pub auth: AuthConfig,

    /// Email provider configuration
    pub email: EmailConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Verification code sweeper configuration
    #[serde(default)]
    pub sweeper: SweeperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sweeper: SweeperConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Every sub-configuration reads its own variables; missing values
    /// fall back to development defaults.
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            email: EmailConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            sweeper: SweeperConfig::from_env(),
        }
    }
}
