//! Shared test harness: in-memory auth provider and app state builder.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use actix_web::web;
use tb_api::state::AppState;
use tb_core::domain::entities::user::User;
use tb_core::errors::{AuthError, DomainError};
use tb_core::repositories::{
    MockTodoRepository, MockUserRepository, MockVerificationCodeRepository, UserRepository,
};
use tb_core::services::auth::{
    AuthGateway, AuthProvider, AuthSession, Credentials, InMemoryRateLimiter, NewUser,
    ProtocolRequest, ProtocolResponse, Session,
};
use tb_core::services::todo::TodoService;
use tb_core::services::verification::{MockEmailService, OtpService, VerificationConfig};

/// In-memory auth provider over the mock user repository
pub struct MockAuthProvider {
    users: Arc<MockUserRepository>,
    passwords: RwLock<HashMap<String, String>>,
    sessions: RwLock<HashMap<String, (Uuid, DateTime<Utc>)>>,
}

impl MockAuthProvider {
    pub fn new(users: Arc<MockUserRepository>) -> Self {
        Self {
            users,
            passwords: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_up(&self, new_user: NewUser) -> Result<AuthSession, DomainError> {
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let user = User::new(new_user.email.clone(), new_user.name);
        self.users.insert(user.clone()).await;
        self.passwords
            .write()
            .await
            .insert(new_user.email, new_user.password);

        Ok(AuthSession {
            user,
            session: None,
        })
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession, DomainError> {
        let stored = self.passwords.read().await.get(&credentials.email).cloned();
        if stored.as_deref() != Some(credentials.password.as_str()) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = format!("tok-{}", Uuid::new_v4());
        let expires_at = Utc::now() + ChronoDuration::days(7);
        self.sessions
            .write()
            .await
            .insert(token.clone(), (user.id, expires_at));

        Ok(AuthSession {
            user,
            session: Some(Session { token, expires_at }),
        })
    }

    async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let entry = self.sessions.read().await.get(token).copied();
        let (user_id, expires_at) = entry.ok_or(DomainError::Unauthorized)?;

        if expires_at <= Utc::now() {
            return Err(AuthError::SessionExpired.into());
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    async fn handle_protocol_request(
        &self,
        request: ProtocolRequest,
    ) -> Result<ProtocolResponse, DomainError> {
        match (request.method.as_str(), request.path.as_str()) {
            ("GET", "get-session") => {
                let token = request.bearer_token.ok_or(DomainError::Unauthorized)?;
                let user = self.authenticate(&token).await?;
                Ok(ProtocolResponse {
                    status: 200,
                    body: serde_json::json!({ "user": user }),
                })
            }
            ("POST", "sign-out") => {
                let token = request.bearer_token.ok_or(DomainError::Unauthorized)?;
                self.sessions.write().await.remove(&token);
                Ok(ProtocolResponse {
                    status: 200,
                    body: serde_json::json!({ "success": true }),
                })
            }
            _ => Ok(ProtocolResponse {
                status: 404,
                body: serde_json::json!({ "error": "Not found" }),
            }),
        }
    }
}

pub type TestState = AppState<
    MockAuthProvider,
    MockVerificationCodeRepository,
    MockUserRepository,
    MockEmailService,
    MockTodoRepository,
>;

/// Everything a test needs to drive the app and inspect side effects
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub provider: Arc<MockAuthProvider>,
    pub users: Arc<MockUserRepository>,
    pub codes: Arc<MockVerificationCodeRepository>,
    pub mailer: Arc<MockEmailService>,
}

/// Build an app state over in-memory mocks
pub fn test_context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let todos = Arc::new(MockTodoRepository::new());

    let otp_service = Arc::new(OtpService::new(
        codes.clone(),
        users.clone(),
        mailer.clone(),
        VerificationConfig::default(),
    ));
    let provider = Arc::new(MockAuthProvider::new(users.clone()));
    let auth_gateway = Arc::new(AuthGateway::new(provider.clone(), otp_service.clone()));
    let todo_service = Arc::new(TodoService::new(todos));

    let state = web::Data::new(AppState {
        auth_gateway,
        otp_service,
        todo_service,
        rate_limiter: Arc::new(InMemoryRateLimiter::new(5, Duration::from_secs(900))),
        rate_limit_enabled: true,
    });

    TestContext {
        state,
        provider,
        users,
        codes,
        mailer,
    }
}
