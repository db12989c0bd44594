//! Verification code entity for email OTP verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A one-time passcode bound to an email address
///
/// Rows are never updated in place: issuing a new code for the same
/// identifier deletes the previous rows first, so at most one valid code
/// exists per identifier at any successful lookup time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code row
    pub id: Uuid,

    /// Email address this code was issued for
    pub identifier: String,

    /// The 6-digit verification code
    pub value: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code with a random 6-digit value
    /// expiring after [`DEFAULT_EXPIRATION_MINUTES`]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::new_with_expiration(identifier, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time
    ///
    /// # Arguments
    ///
    /// * `identifier` - The email address the code is bound to
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn new_with_expiration(identifier: impl Into<String>, expiration_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            value: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code
    ///
    /// Uniformly sampled from 100000..=999999 with the OS CSPRNG, so the
    /// code always has exactly six digits and no leading zero.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks if the verification code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Compares a submitted code against this one in constant time
    pub fn matches(&self, input: &str) -> bool {
        self.value.len() == input.len() && constant_time_eq(self.value.as_bytes(), input.as_bytes())
    }
}
