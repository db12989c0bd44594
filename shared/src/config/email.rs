//! Transactional email provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the outbound email API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Base URL of the email provider API
    pub api_url: String,

    /// API key for the email provider
    pub api_key: String,

    /// Sender address, e.g. "Tickbox <no-reply@mail.tickbox.app>"
    pub from_address: String,

    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.resend.com/emails"),
            api_key: String::new(),
            from_address: String::from("Tickbox <no-reply@localhost>"),
            request_timeout_secs: 30,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Tickbox <no-reply@localhost>".to_string()),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}
