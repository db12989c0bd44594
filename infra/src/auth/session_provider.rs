//! Session-backed implementation of the AuthProvider capability.
//!
//! Password hashing is delegated to bcrypt; session tokens are opaque
//! 32-byte random values handed to the client once and stored only as
//! SHA-256 hashes. Per configuration, sign-up does not issue a session:
//! a new account authenticates only after its email is verified.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::user::User;
use tb_core::errors::{AuthError, DomainError};
use tb_core::services::auth::{
    AuthProvider, AuthSession, Credentials, NewUser, ProtocolRequest, ProtocolResponse, Session,
};
use tb_shared::config::AuthConfig;
use tb_shared::utils::email::mask_email;

use crate::database::mysql::MySqlUserRepository;

/// Session-backed auth provider over MySQL
pub struct SessionAuthProvider {
    pool: MySqlPool,
    config: AuthConfig,
}

impl SessionAuthProvider {
    /// Create a new provider
    pub fn new(pool: MySqlPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    /// Generate an opaque session token (32 random bytes, URL-safe base64)
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Hash a token for storage
    ///
    /// Only the hash ever touches the database, so a leaked sessions
    /// table cannot be replayed.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Insert a session row and return the plaintext token
    async fn create_session(&self, user_id: Uuid) -> Result<Session, DomainError> {
        let token = Self::generate_token();
        let now = Utc::now();
        let expires_at = now + Duration::days(self.config.session_ttl_days);

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(Self::hash_token(&token))
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to create session: {}", e)))?;

        Ok(Session { token, expires_at })
    }

    /// Delete the session row for a token, if any
    async fn revoke_session(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to revoke session: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AuthProvider for SessionAuthProvider {
    async fn sign_up(&self, new_user: NewUser) -> Result<AuthSession, DomainError> {
        let password_hash = bcrypt::hash(&new_user.password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))?;

        let user = User::new(new_user.email, new_user.name);

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, email_verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, FALSE, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            // The unique index on email is the duplicate check; a racing
            // sign-up loses here rather than at a pre-read
            if e.as_database_error()
                .map(|d| d.is_unique_violation())
                .unwrap_or(false)
            {
                tracing::warn!(
                    email = %mask_email(&user.email),
                    event = "signup_duplicate",
                    "Sign-up attempted for existing address"
                );
                return Err(AuthError::UserAlreadyExists.into());
            }
            return Err(DomainError::internal(format!("Failed to create user: {}", e)));
        }

        let session = if self.config.auto_sign_in {
            Some(self.create_session(user.id).await?)
        } else {
            None
        };

        Ok(AuthSession { user, session })
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, password_hash, email_verified, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(&credentials.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to load user: {}", e)))?;

        let row = row.ok_or(AuthError::InvalidCredentials)?;

        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?;

        let valid = bcrypt::verify(&credentials.password, &password_hash)
            .map_err(|e| DomainError::internal(format!("Failed to verify password: {}", e)))?;

        if !valid {
            tracing::warn!(
                email = %mask_email(&credentials.email),
                event = "signin_failed",
                "Sign-in with invalid credentials"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = MySqlUserRepository::row_to_user(&row)?;
        let session = self.create_session(user.id).await?;

        Ok(AuthSession {
            user,
            session: Some(session),
        })
    }

    async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email, u.name, u.email_verified, u.created_at, u.updated_at,
                   s.expires_at AS session_expires_at
            FROM sessions s
            INNER JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ?
            LIMIT 1
            "#,
        )
        .bind(Self::hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to load session: {}", e)))?;

        let row = row.ok_or(DomainError::Unauthorized)?;

        let expires_at: DateTime<Utc> = row
            .try_get("session_expires_at")
            .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?;

        if expires_at <= Utc::now() {
            // Expired rows are removed eagerly; authenticate is the only
            // reader that can observe them
            let _ = self.revoke_session(token).await;
            return Err(AuthError::SessionExpired.into());
        }

        MySqlUserRepository::row_to_user(&row)
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
                self.revoke_session(&token).await?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_is_url_safe_and_unique() {
        let a = SessionAuthProvider::generate_token();
        let b = SessionAuthProvider::generate_token();

        assert_ne!(a, b);
        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let token = "some-token";
        let h1 = SessionAuthProvider::hash_token(token);
        let h2 = SessionAuthProvider::hash_token(token);

        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(h1, SessionAuthProvider::hash_token("other-token"));
    }
}
