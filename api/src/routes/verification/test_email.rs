//! Handler for POST /test-email
//!
//! Diagnostic only: issues a code without requiring a user row and
//! returns the plaintext code in the response. Excluded from the
//! production contract.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{TestEmailRequest, TestEmailResponse};
use crate::handlers::{error_response, validation_error_response};
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::AuthProvider;
use tb_core::services::verification::EmailServiceTrait;
use tb_shared::utils::email::normalize_email;

/// Issue a code and echo it back
pub async fn test_email<P, V, U, M, D>(
    state: web::Data<AppState<P, V, U, M, D>>,
    request: web::Json<TestEmailRequest>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = normalize_email(&request.email);

    match state.otp_service.issue(&email).await {
        Ok(result) => HttpResponse::Ok().json(TestEmailResponse {
            message: format!("Test email sent to {}", email),
            code: result.code.value,
        }),
        Err(error) => error_response(&error),
    }
}
