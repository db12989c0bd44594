//! Authentication provider capability interface
//!
//! Everything the application needs from its authentication library,
//! expressed as a contract: inputs, success payloads, error variants.
//! The core layer never sees password hashes, token formats, or session
//! SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Payload for creating a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Payload for signing in
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token, shown to the client exactly once
    pub token: String,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

/// Result of a sign-up or sign-in
///
/// `session` is absent on sign-up: per configuration a new account is
/// not authenticated until its email address is verified.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: User,
    pub session: Option<Session>,
}

/// A request forwarded to the provider's own protocol surface
/// (`/api/auth/*` beyond sign-up and sign-in)
#[derive(Debug, Clone)]
pub struct ProtocolRequest {
    /// HTTP method, uppercased
    pub method: String,

    /// Path tail after `/api/auth/`, e.g. `get-session`
    pub path: String,

    /// Bearer token from the Authorization header, if any
    pub bearer_token: Option<String>,
}

/// Provider response for a protocol request
#[derive(Debug, Clone)]
pub struct ProtocolResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Capability interface over the external authentication library
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account
    ///
    /// # Errors
    /// * [`crate::errors::AuthError::UserAlreadyExists`] for a duplicate address
    async fn sign_up(&self, new_user: NewUser) -> Result<AuthSession, DomainError>;

    /// Verify credentials and issue a session
    ///
    /// # Errors
    /// * [`crate::errors::AuthError::InvalidCredentials`] for a bad email/password pair
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession, DomainError>;

    /// Resolve a bearer token to its user
    ///
    /// # Errors
    /// * [`DomainError::Unauthorized`] for an unknown or expired token
    async fn authenticate(&self, token: &str) -> Result<User, DomainError>;

    /// Handle a request on the provider's own protocol surface
    ///
    /// Unknown paths yield a 404 response; this method only errors on
    /// collaborator failures.
    async fn handle_protocol_request(
        &self,
        request: ProtocolRequest,
    ) -> Result<ProtocolResponse, DomainError>;
}
