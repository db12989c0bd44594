//! Handler for POST /api/resend-otp
//!
//! The one rate-limited endpoint: a fixed window keyed on the client
//! address guards it. The OTP service itself never sees the limiter and
//! stays correct when the guard is absent or unavailable.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::{OtpActionResponse, ResendOtpRequest};
use crate::handlers::{error_response, validation_error_response};
use crate::routes::extract_client_ip;
use crate::state::AppState;

use tb_core::errors::AuthError;
use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::{AuthProvider, RateLimitDecision};
use tb_core::services::verification::EmailServiceTrait;
use tb_shared::utils::email::{mask_email, normalize_email};

/// Re-issue a verification code for an unverified account
pub async fn resend_otp<P, V, U, M, D>(
    req: HttpRequest,
    state: web::Data<AppState<P, V, U, M, D>>,
    request: web::Json<ResendOtpRequest>,
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
    let client_ip = extract_client_ip(&req);

    if state.rate_limit_enabled {
        let key = format!("resend_otp:{}", client_ip);
        match state.rate_limiter.check(&key).await {
            Ok(RateLimitDecision::Limited {
                retry_after_seconds,
            }) => {
                tracing::warn!(
                    email = %mask_email(&email),
                    client_ip = %client_ip,
                    retry_after_seconds,
                    event = "resend_rate_limited",
                    "Resend request rate limited"
                );
                return error_response(
                    &AuthError::RateLimitExceeded {
                        retry_after_seconds,
                    }
                    .into(),
                );
            }
            Ok(RateLimitDecision::Allowed { .. }) => {}
            Err(e) => {
                // Fail open: a broken limiter backend must not take the
                // endpoint down
                tracing::warn!(error = %e, "Rate limiter unavailable, allowing request");
            }
        }
    }

    match state.otp_service.resend(&email).await {
        Ok(_) => HttpResponse::Ok().json(OtpActionResponse {
            message: "Verification code sent".to_string(),
            success: true,
        }),
        Err(error) => error_response(&error),
    }
}
