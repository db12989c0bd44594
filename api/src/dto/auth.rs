//! Authentication and verification DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,

    /// Plaintext password, hashed by the auth provider
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TestEmailRequest {
    #[validate(email)]
    pub email: String,
}

/// Response for verify-otp and resend-otp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpActionResponse {
    pub message: String,
    pub success: bool,
}

/// Response for the verification status lookup
///
/// Field names are camelCase on the wire, matching the clients this
/// endpoint was built for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatusResponse {
    pub email_verified: bool,
    pub email: String,
}

/// Response for the diagnostic test-email endpoint
///
/// Exposes the plaintext code; never mounted in production contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEmailResponse {
    pub message: String,
    pub code: String,
}
