//! Verification code repository trait.
//!
//! The storage layer enforces the one-valid-code-per-identifier
//! invariant through delete-then-insert; no in-process coordination is
//! layered on top.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for verification code persistence
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert a new verification code row
    async fn insert(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Fetch all non-expired codes for an identifier
    ///
    /// Expiry is folded into the query (`expires_at > now`) so callers
    /// cannot distinguish an expired code from an absent one. The value
    /// comparison stays with the caller, which performs it in constant
    /// time.
    ///
    /// # Arguments
    /// * `identifier` - The email address the codes are bound to
    /// * `now` - The lookup instant
    async fn find_active(
        &self,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VerificationCode>, DomainError>;

    /// Delete every code row for an identifier
    ///
    /// # Returns
    /// Number of rows deleted
    async fn delete_by_identifier(&self, identifier: &str) -> Result<u64, DomainError>;

    /// Delete every code row with `expires_at <= now`
    ///
    /// # Returns
    /// Number of rows deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
