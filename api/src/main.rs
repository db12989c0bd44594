//! Tickbox API server entry point

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tb_api::app::create_app;
use tb_api::state::AppState;
use tb_core::services::auth::{AuthGateway, InMemoryRateLimiter, RateLimiterTrait};
use tb_core::services::todo::TodoService;
use tb_core::services::verification::{CodeSweeper, OtpService, VerificationConfig};
use tb_infra::{
    create_pool, MySqlTodoRepository, MySqlUserRepository, MySqlVerificationCodeRepository,
    RedisRateLimiter, ResendEmailService, SessionAuthProvider,
};
use tb_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    info!(environment = %config.environment, "Starting Tickbox API server");

    // Database pool and repositories
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to connect to the database");

    let code_repository = Arc::new(MySqlVerificationCodeRepository::new(pool.clone()));
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let todo_repository = Arc::new(MySqlTodoRepository::new(pool.clone()));

    // Collaborators
    let email_service =
        Arc::new(ResendEmailService::new(config.email.clone()).expect("Email service configuration"));
    let provider = Arc::new(SessionAuthProvider::new(pool.clone(), config.auth.clone()));

    // Services
    let otp_service = Arc::new(OtpService::new(
        code_repository.clone(),
        user_repository.clone(),
        email_service,
        VerificationConfig::default(),
    ));
    let auth_gateway = Arc::new(AuthGateway::new(provider.clone(), otp_service.clone()));
    let todo_service = Arc::new(TodoService::new(todo_repository));

    // Rate limiter: Redis when configured, in-process otherwise
    let resend_limit = &config.rate_limit.resend;
    let rate_limiter: Arc<dyn RateLimiterTrait> = match &config.rate_limit.redis_url {
        Some(url) => Arc::new(
            RedisRateLimiter::new(url, resend_limit.max_requests, resend_limit.window_seconds)
                .expect("Failed to open Redis client"),
        ),
        None => Arc::new(InMemoryRateLimiter::new(
            resend_limit.max_requests,
            Duration::from_secs(resend_limit.window_seconds),
        )),
    };

    // Start the hourly sweep of expired verification codes
    let sweeper = Arc::new(CodeSweeper::new(code_repository, config.sweeper.clone()));
    let sweeper_handle = sweeper.spawn();

    let state = web::Data::new(AppState {
        auth_gateway,
        otp_service,
        todo_service,
        rate_limiter,
        rate_limit_enabled: config.rate_limit.enabled,
    });

    let bind_address = config.server.bind_address();
    info!(bind_address = %bind_address, "Server binding");

    let workers = config.server.workers;
    let server = HttpServer::new(move || create_app(state.clone(), provider.clone()))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    let server = if workers > 0 {
        server.workers(workers)
    } else {
        server
    };

    let result = server.bind(&bind_address)?.run().await;

    // Clean shutdown of the background sweep
    sweeper_handle.stop().await;

    result
}
