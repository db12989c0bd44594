//! User repository trait defining the interface for account lookups.
//!
//! The auth provider owns user creation (it also writes credential
//! material); the core layer only reads accounts and flips the
//! verification flag, so this trait stays deliberately narrow.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address
    ///
    /// # Arguments
    /// * `email` - Normalized (lowercase) email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this address
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Set `email_verified = true` for the user with this address
    ///
    /// # Returns
    /// * `Ok(true)` - A user row was updated
    /// * `Ok(false)` - No user exists with this address
    /// * `Err(DomainError)` - Update failed
    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError>;
}
