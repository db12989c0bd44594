//! Result types for verification operations

use crate::domain::entities::verification_code::VerificationCode;

/// Outcome of a successful Issue or Resend operation
///
/// Carries the stored code so the diagnostic endpoint can expose it;
/// production handlers must never serialize `code.value`.
#[derive(Debug, Clone)]
pub struct IssueCodeResult {
    /// The verification code that was stored
    pub code: VerificationCode,

    /// Message id returned by the email provider
    pub message_id: String,
}
