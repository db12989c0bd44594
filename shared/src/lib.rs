//! Shared utilities and common types for the Tickbox server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (email validation and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, RateLimitConfig,
    ServerConfig, SweeperConfig,
};
pub use utils::email;
