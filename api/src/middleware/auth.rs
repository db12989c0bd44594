//! Bearer-session authentication middleware for protected endpoints.
//!
//! Extracts the bearer token from the Authorization header, resolves it
//! through the auth provider, and injects the user into the request
//! extensions. Requests without a valid session are answered with the
//! standard 401 envelope before they reach a handler.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::dto::ErrorBody;
use tb_core::domain::entities::user::User;
use tb_core::services::auth::AuthProvider;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user
    pub user: User,
}

/// Read the authenticated user placed by [`SessionAuth`]
///
/// Only callable from handlers mounted behind the middleware.
pub fn authenticated_user(req: &HttpRequest) -> Option<User> {
    req.extensions().get::<AuthContext>().map(|c| c.user.clone())
}

/// Session authentication middleware factory
pub struct SessionAuth<P: AuthProvider + 'static> {
    provider: Arc<P>,
}

impl<P: AuthProvider> SessionAuth<P> {
    /// Creates a new session authentication middleware
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<S, B, P> Transform<S, ServiceRequest> for SessionAuth<P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    P: AuthProvider + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S, P>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            provider: self.provider.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S, P: AuthProvider + 'static> {
    service: Rc<S>,
    provider: Arc<P>,
}

impl<S, B, P> Service<ServiceRequest> for SessionAuthMiddleware<S, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    P: AuthProvider + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let provider = self.provider.clone();

        Box::pin(async move {
            let token = extract_bearer_token(&req);

            let token = match token {
                Some(token) => token,
                None => return Err(unauthorized("Unauthorized")),
            };

            match provider.authenticate(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(AuthContext { user });
                    service.call(req).await
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected bearer token");
                    Err(unauthorized("Unauthorized"))
                }
            }
        })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn unauthorized(message: &str) -> Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Unauthorized().json(ErrorBody::new(message)),
    )
    .into()
}
