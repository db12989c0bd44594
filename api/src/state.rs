//! Application state shared across handlers

use std::sync::Arc;

use tb_core::repositories::{TodoRepository, UserRepository, VerificationCodeRepository};
use tb_core::services::auth::{AuthGateway, AuthProvider, RateLimiterTrait};
use tb_core::services::todo::TodoService;
use tb_core::services::verification::{EmailServiceTrait, OtpService};

/// Application state holding the shared services
pub struct AppState<P, V, U, M, D>
where
    P: AuthProvider,
    V: VerificationCodeRepository,
    U: UserRepository,
    M: EmailServiceTrait,
    D: TodoRepository,
{
    pub auth_gateway: Arc<AuthGateway<P, V, U, M>>,
    pub otp_service: Arc<OtpService<V, U, M>>,
    pub todo_service: Arc<TodoService<D>>,
    /// Boxed so the backend (Redis or in-memory) is a runtime choice
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
    pub rate_limit_enabled: bool,
}
