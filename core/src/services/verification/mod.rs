//! Verification service module for email OTP verification
//!
//! This module provides the complete one-time-passcode workflow:
//! - Code generation and email dispatch
//! - Code validation with constant-time comparison
//! - Resend with user-state preconditions
//! - Periodic sweep of expired codes

mod config;
mod mock;
mod service;
mod sweeper;
mod traits;
mod types;

pub use config::VerificationConfig;
pub use mock::{MockEmailService, SentEmail};
pub use service::OtpService;
pub use sweeper::{CodeSweeper, SweeperHandle};
pub use traits::EmailServiceTrait;
pub use types::IssueCodeResult;
