//! Handler for POST /api/verify-otp

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{OtpActionResponse, VerifyOtpRequest};
use crate::handlers::{error_response, validation_error_response};
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::AuthProvider;
use tb_core::services::verification::EmailServiceTrait;
use tb_shared::utils::email::{mask_email, normalize_email};

/// Validate a submitted code and mark the email verified
///
/// A wrong code and an expired one produce the same 400 response.
pub async fn verify_otp<P, V, U, M, D>(
    state: web::Data<AppState<P, V, U, M, D>>,
    request: web::Json<VerifyOtpRequest>,
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

    tracing::info!(email = %mask_email(&email), "Processing verify-otp request");

    match state.otp_service.validate(&email, &request.code).await {
        Ok(()) => HttpResponse::Ok().json(OtpActionResponse {
            message: "Email verified successfully".to_string(),
            success: true,
        }),
        Err(error) => error_response(&error),
    }
}
