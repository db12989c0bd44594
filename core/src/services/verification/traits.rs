//! Traits for email dispatch integration

use async_trait::async_trait;

/// Trait for the transactional email collaborator
///
/// The production implementation drives an HTTP email API; tests use
/// [`super::MockEmailService`]. Errors are plain strings because the
/// service maps every dispatch failure to the same generic error anyway.
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to an address
    ///
    /// # Returns
    /// Provider message id on success
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<String, String>;
}
