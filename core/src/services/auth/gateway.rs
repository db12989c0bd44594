//! Authentication gateway orchestration

use std::sync::Arc;

use crate::errors::DomainResult;
use crate::repositories::{UserRepository, VerificationCodeRepository};
use crate::services::verification::{EmailServiceTrait, OtpService};
use tb_shared::utils::email::mask_email;

use super::provider::{
    AuthProvider, AuthSession, Credentials, NewUser, ProtocolRequest, ProtocolResponse,
};

/// Gateway delegating credential work to the auth provider
///
/// On sign-up it triggers OTP issuance for the new address; everything
/// else is pure delegation.
pub struct AuthGateway<P, V, U, M>
where
    P: AuthProvider,
    V: VerificationCodeRepository,
    U: UserRepository,
    M: EmailServiceTrait,
{
    provider: Arc<P>,
    otp_service: Arc<OtpService<V, U, M>>,
}

impl<P, V, U, M> AuthGateway<P, V, U, M>
where
    P: AuthProvider,
    V: VerificationCodeRepository,
    U: UserRepository,
    M: EmailServiceTrait,
{
    /// Create a new gateway
    pub fn new(provider: Arc<P>, otp_service: Arc<OtpService<V, U, M>>) -> Self {
        Self {
            provider,
            otp_service,
        }
    }

    /// Create an account and issue the first verification code
    ///
    /// The provider is configured not to auto-authenticate, so the
    /// returned session is absent until verification completes. A
    /// failure to issue the OTP fails the whole sign-up visibly; the
    /// client recovers via the resend endpoint.
    pub async fn sign_up(&self, new_user: NewUser) -> DomainResult<AuthSession> {
        let email = new_user.email.clone();
        let session = self.provider.sign_up(new_user).await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %session.user.id,
            event = "user_signed_up",
            "New account created, issuing verification code"
        );

        self.otp_service.issue(&email).await?;

        Ok(session)
    }

    /// Verify credentials and issue a session
    pub async fn sign_in(&self, credentials: Credentials) -> DomainResult<AuthSession> {
        let email = credentials.email.clone();
        let session = self.provider.sign_in(credentials).await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %session.user.id,
            event = "user_signed_in",
            "User signed in"
        );

        Ok(session)
    }

    /// Forward a request to the provider's protocol surface
    pub async fn handle_protocol_request(
        &self,
        request: ProtocolRequest,
    ) -> DomainResult<ProtocolResponse> {
        self.provider.handle_protocol_request(request).await
    }
}
