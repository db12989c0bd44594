//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// OTP resend limits
    pub resend: ResendRateLimit,

    /// Redis connection URL, when a distributed limiter is wanted
    #[serde(default)]
    pub redis_url: Option<String>,
}

/// Fixed-window limit for OTP resend requests, keyed by client address
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResendRateLimit {
    /// Max resend requests per client address per window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for ResendRateLimit {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_seconds: 900, // 15 minutes
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            resend: ResendRateLimit::default(),
            redis_url: None,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_requests = std::env::var("RESEND_RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        let window_seconds = std::env::var("RESEND_RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900);

        Self {
            enabled: true,
            resend: ResendRateLimit {
                max_requests,
                window_seconds,
            },
            redis_url: std::env::var("REDIS_URL").ok(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
