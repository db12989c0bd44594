//! Session issuance configuration

use serde::{Deserialize, Serialize};

/// Configuration for the authentication provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret used by the auth provider (reserved for token derivation)
    pub secret: String,

    /// Session lifetime in days
    pub session_ttl_days: i64,

    /// Whether sign-up immediately issues a session
    ///
    /// Disabled: new accounts receive a session only after email
    /// verification completes.
    pub auto_sign_in: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret"),
            session_ttl_days: 7,
            auto_sign_in: false,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_SECRET")
            .unwrap_or_else(|_| "development-secret".to_string());
        let session_ttl_days = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        Self {
            secret,
            session_ttl_days,
            auto_sign_in: false,
        }
    }
}
