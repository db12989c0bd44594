//! Handler for POST /api/auth/sign-in

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::SignInRequest;
use crate::handlers::{error_response, validation_error_response};
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::{AuthProvider, Credentials};
use tb_core::services::verification::EmailServiceTrait;
use tb_shared::utils::email::normalize_email;

/// Verify credentials and issue a session
pub async fn sign_in<P, V, U, M, D>(
    state: web::Data<AppState<P, V, U, M, D>>,
    request: web::Json<SignInRequest>,
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

    let credentials = Credentials {
        email: normalize_email(&request.email),
        password: request.password.clone(),
    };

    match state.auth_gateway.sign_in(credentials).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(error) => error_response(&error),
    }
}
