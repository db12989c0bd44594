//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{VerificationCode, CODE_LENGTH};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{UserRepository, VerificationCodeRepository};
use tb_shared::utils::email::mask_email;

use super::config::VerificationConfig;
use super::traits::EmailServiceTrait;
use super::types::IssueCodeResult;

/// One-time-passcode lifecycle service
///
/// Issues, validates, and retires short-lived numeric verification codes
/// bound to an email identifier. Correctness relies on the storage
/// layer's delete-then-insert pattern rather than in-process locks:
/// concurrent issues for the same identifier race and the last writer
/// wins, which is acceptable because only one outstanding code is meant
/// to be valid.
pub struct OtpService<V, U, M>
where
    V: VerificationCodeRepository,
    U: UserRepository,
    M: EmailServiceTrait,
{
    /// Verification code storage
    code_repository: Arc<V>,
    /// User storage, touched only to flip the verified flag
    user_repository: Arc<U>,
    /// Email dispatch collaborator
    email_service: Arc<M>,
    /// Service configuration
    config: VerificationConfig,
}

impl<V, U, M> OtpService<V, U, M>
where
    V: VerificationCodeRepository,
    U: UserRepository,
    M: EmailServiceTrait,
{
    /// Create a new verification service
    pub fn new(
        code_repository: Arc<V>,
        user_repository: Arc<U>,
        email_service: Arc<M>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            code_repository,
            user_repository,
            email_service,
            config,
        }
    }

    /// Issue a verification code for an identifier
    ///
    /// Deletes any existing codes for the identifier, stores a fresh
    /// 6-digit code expiring after the configured window, and requests
    /// delivery. A persist or dispatch failure fails the whole operation;
    /// there are no retries. A code row left behind by a failed dispatch
    /// is harmless: it is superseded by the next issue and swept once
    /// expired.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The email address to bind the code to
    pub async fn issue(&self, identifier: &str) -> DomainResult<IssueCodeResult> {
        // Supersede any outstanding codes so only the newest one is valid
        self.code_repository
            .delete_by_identifier(identifier)
            .await?;

        let code = VerificationCode::new_with_expiration(
            identifier,
            self.config.code_expiration_minutes,
        );

        let stored = self.code_repository.insert(code).await?;

        tracing::info!(
            identifier = %mask_email(identifier),
            session_id = %stored.id,
            event = "otp_issued",
            "Issued new verification code"
        );

        let message_id = self
            .email_service
            .send_verification_code(identifier, &stored.value)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %mask_email(identifier),
                    error = %e,
                    event = "otp_dispatch_failed",
                    "Failed to dispatch verification email"
                );
                DomainError::Auth(AuthError::EmailServiceFailure)
            })?;

        Ok(IssueCodeResult {
            code: stored,
            message_id,
        })
    }

    /// Validate a submitted code for an identifier
    ///
    /// A wrong code and a correct-but-expired code fail identically with
    /// [`AuthError::InvalidOrExpiredCode`]; expiry is folded into the
    /// storage lookup and the value comparison runs in constant time.
    ///
    /// On success the user's `email_verified` flag is set first, then
    /// *all* code rows for the identifier are deleted. The two steps are
    /// deliberately not wrapped in a transaction: a crash in between
    /// leaves a stale row that is harmless once the user is verified and
    /// will be swept eventually.
    pub async fn validate(&self, identifier: &str, code: &str) -> DomainResult<()> {
        // Malformed codes cannot match anything; fail without a lookup
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                identifier = %mask_email(identifier),
                code_length = code.len(),
                event = "otp_invalid_format",
                "Rejected verification code with invalid format"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        let candidates = self
            .code_repository
            .find_active(identifier, Utc::now())
            .await?;

        if !candidates.iter().any(|c| c.matches(code)) {
            tracing::warn!(
                identifier = %mask_email(identifier),
                event = "otp_verification_failed",
                "Verification code did not match"
            );
            return Err(AuthError::InvalidOrExpiredCode.into());
        }

        let updated = self.user_repository.mark_email_verified(identifier).await?;
        if !updated {
            // A valid code without a user row: the account vanished
            // between issue and validate. Fail loudly instead of
            // silently deleting the codes.
            return Err(DomainError::not_found("User"));
        }

        // Defensive cleanup: remove every row for the identifier, not
        // just the matched one, so no orphan from an earlier issue can
        // linger.
        self.code_repository
            .delete_by_identifier(identifier)
            .await?;

        tracing::info!(
            identifier = %mask_email(identifier),
            event = "otp_verified",
            "Verification code accepted, email marked verified"
        );

        Ok(())
    }

    /// Re-issue a verification code for an existing, unverified user
    ///
    /// Preconditions: the user must exist ([`AuthError::UserNotFound`])
    /// and must not be verified yet ([`AuthError::AlreadyVerified`]).
    /// The external rate limiter guards this path at the API boundary;
    /// the service stays correct without it.
    pub async fn resend(&self, identifier: &str) -> DomainResult<IssueCodeResult> {
        let user = self
            .user_repository
            .find_by_email(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        self.issue(identifier).await
    }

    /// Delete all expired code rows
    ///
    /// Idempotent; invoked on a fixed interval by [`super::CodeSweeper`].
    ///
    /// # Returns
    /// Number of rows deleted
    pub async fn sweep(&self) -> DomainResult<u64> {
        let deleted = self.code_repository.delete_expired(Utc::now()).await?;
        if deleted > 0 {
            tracing::info!(deleted, event = "otp_sweep", "Swept expired verification codes");
        }
        Ok(deleted)
    }

    /// Look up the verification state for an identifier
    ///
    /// # Returns
    /// The user, or [`AuthError::UserNotFound`]
    pub async fn verification_status(&self, identifier: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_email(identifier)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}
