//! Handler for POST /api/auth/sign-up

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::SignUpRequest;
use crate::handlers::{error_response, validation_error_response};
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::{AuthProvider, NewUser};
use tb_core::services::verification::EmailServiceTrait;
use tb_shared::utils::email::{mask_email, normalize_email};

/// Create an account and send the first verification code
///
/// Returns `{user, session}`; `session` is null until the email is
/// verified. A duplicate address yields 400, a storage or email failure
/// 500.
pub async fn sign_up<P, V, U, M, D>(
    state: web::Data<AppState<P, V, U, M, D>>,
    request: web::Json<SignUpRequest>,
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

    tracing::info!(email = %mask_email(&email), "Processing sign-up request");

    let new_user = NewUser {
        email,
        password: request.password.clone(),
        name: request.name.trim().to_string(),
    };

    match state.auth_gateway.sign_up(new_user).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(error) => error_response(&error),
    }
}
