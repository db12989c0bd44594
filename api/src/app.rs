//! Application factory
//!
//! Builds the actix-web application from an [`AppState`] and the auth
//! provider. Tests construct the same app over in-memory mocks.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::middleware::{create_cors, SessionAuth};
use crate::routes::{auth, todos, verification};
use crate::state::AppState;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::AuthProvider;
use tb_core::services::verification::EmailServiceTrait;

/// Create and configure the application with all dependencies
pub fn create_app<P, V, U, M, D>(
    state: web::Data<AppState<P, V, U, M, D>>,
    provider: Arc<P>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    P: AuthProvider + 'static,
    V: VerificationCodeRepository + 'static,
    U: UserRepository + 'static,
    M: EmailServiceTrait + 'static,
    D: TodoRepository + 'static,
{
    App::new()
        .app_data(state)
        .wrap(TracingLogger::default())
        .wrap(create_cors())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Diagnostic endpoint, outside the /api contract
        .route("/test-email", web::post().to(verification::test_email::<P, V, U, M, D>))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/sign-up", web::post().to(auth::sign_up::<P, V, U, M, D>))
                        .route("/sign-in", web::post().to(auth::sign_in::<P, V, U, M, D>))
                        // Everything else under /api/auth/ goes to the provider
                        .default_service(web::route().to(auth::protocol::<P, V, U, M, D>)),
                )
                .route("/verify-otp", web::post().to(verification::verify_otp::<P, V, U, M, D>))
                .route("/resend-otp", web::post().to(verification::resend_otp::<P, V, U, M, D>))
                .route(
                    "/verification-status/{email}",
                    web::get().to(verification::verification_status::<P, V, U, M, D>),
                )
                .service(
                    web::scope("/todos")
                        .wrap(SessionAuth::new(provider))
                        .route("", web::get().to(todos::list_todos::<P, V, U, M, D>))
                        .route("", web::post().to(todos::create_todo::<P, V, U, M, D>))
                        .route("/{id}", web::get().to(todos::get_todo::<P, V, U, M, D>))
                        .route("/{id}", web::put().to(todos::update_todo::<P, V, U, M, D>))
                        .route("/{id}", web::delete().to(todos::delete_todo::<P, V, U, M, D>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tickbox-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "The requested resource was not found"
    }))
}
