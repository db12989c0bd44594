//! Handler for GET /api/verification-status/{email}

use actix_web::{web, HttpResponse};

use crate::dto::{ErrorBody, VerificationStatusResponse};
use crate::handlers::error_response;
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::AuthProvider;
use tb_core::services::verification::EmailServiceTrait;
use tb_shared::utils::email::{is_valid_email, normalize_email};

/// Report whether an address has been verified
pub async fn verification_status<P, V, U, M, D>(
    state: web::Data<AppState<P, V, U, M, D>>,
    path: web::Path<String>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let email = normalize_email(&path.into_inner());

    if !is_valid_email(&email) {
        return HttpResponse::NotFound().json(ErrorBody::new("User not found"));
    }

    match state.otp_service.verification_status(&email).await {
        Ok(user) => HttpResponse::Ok().json(VerificationStatusResponse {
            email_verified: user.email_verified,
            email: user.email,
        }),
        Err(error) => error_response(&error),
    }
}
