//! Pass-through for the auth provider's protocol surface
//!
//! Everything under `/api/auth/` that is not sign-up or sign-in is
//! forwarded verbatim to the provider (get-session, sign-out); the
//! provider decides the status and body.

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::handlers::error_response;
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::{AuthProvider, ProtocolRequest};
use tb_core::services::verification::EmailServiceTrait;

/// Forward a request to the auth provider
pub async fn protocol<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
) -> HttpResponse
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    let path = req
        .path()
        .strip_prefix("/api/auth/")
        .unwrap_or("")
        .trim_end_matches('/')
        .to_string();

    let request = ProtocolRequest {
        method: req.method().as_str().to_uppercase(),
        path,
        bearer_token: extract_bearer_token(&req),
    };

    match state.auth_gateway.handle_protocol_request(request).await {
        Ok(response) => {
            let status = StatusCode::from_u16(response.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(response.body)
        }
        Err(error) => error_response(&error),
    }
}

fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
