//! # Tickbox Infrastructure
//!
//! Concrete implementations of the core layer's seams: MySQL
//! repositories, the session-backed auth provider, the transactional
//! email client, and the Redis rate limiter.

pub mod auth;
pub mod database;
pub mod email;
pub mod rate_limit;

use thiserror::Error;

/// Infrastructure-level errors, raised before a domain mapping applies
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Email service error: {0}")]
    Email(String),
}

pub use auth::SessionAuthProvider;
pub use database::{
    create_pool, MySqlTodoRepository, MySqlUserRepository, MySqlVerificationCodeRepository,
};
pub use email::ResendEmailService;
pub use rate_limit::RedisRateLimiter;
