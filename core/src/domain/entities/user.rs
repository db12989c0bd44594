//! User entity representing a registered account.
//!
//! Credential material (password hash) and session rows belong to the
//! auth provider's backing store and never appear here; the core layer
//! only reads account state and flips the verification flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address (unique, normalized to lowercase)
    pub email: String,

    /// Display name
    pub name: String,

    /// Whether the email address has been verified via OTP
    pub email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the email address as verified
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unverified() {
        let user = User::new("alice@example.com", "Alice");

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.name, "Alice");
        assert!(!user.email_verified);
    }

    #[test]
    fn test_verify_email() {
        let mut user = User::new("alice@example.com", "Alice");
        let created = user.updated_at;

        user.verify_email();
        assert!(user.email_verified);
        assert!(user.updated_at >= created);
    }
}
