//! Authentication-specific error types.

use thiserror::Error;

/// Authentication and verification failure scenarios
///
/// Note that `InvalidOrExpiredCode` deliberately covers both a wrong code
/// and a correct-but-expired one: the two cases must be indistinguishable
/// to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    #[error("Too many requests. Please try again in {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("Session expired")]
    SessionExpired,

    #[error("Email service failure")]
    EmailServiceFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::InvalidOrExpiredCode.to_string(),
            "Invalid or expired verification code"
        );
        assert_eq!(
            AuthError::RateLimitExceeded {
                retry_after_seconds: 120
            }
            .to_string(),
            "Too many requests. Please try again in 120 seconds"
        );
    }
}
