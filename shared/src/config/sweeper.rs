//! Verification code sweeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for the background sweep of expired verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweeperConfig {
    /// How often to run the sweep, in seconds
    pub interval_seconds: u64,

    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // hourly
            enabled: true,
        }
    }
}

impl SweeperConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            interval_seconds: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            enabled: std::env::var("SWEEP_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}
