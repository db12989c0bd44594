//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! The one-valid-code-per-identifier invariant is enforced here through
//! delete-then-insert; no row is ever updated in place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::verification_code::VerificationCode;
use tb_core::errors::DomainError;
use tb_core::repositories::VerificationCodeRepository;

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid code UUID: {}", e)))?,
            identifier: row
                .try_get("identifier")
                .map_err(|e| DomainError::internal(format!("Failed to get identifier: {}", e)))?,
            value: row
                .try_get("value")
                .map_err(|e| DomainError::internal(format!("Failed to get value: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn insert(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let query = r#"
            INSERT INTO verification_codes (id, identifier, value, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.identifier)
            .bind(&code.value)
            .bind(code.created_at)
            .bind(code.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to insert verification code: {}", e)))?;

        Ok(code)
    }

    async fn find_active(
        &self,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VerificationCode>, DomainError> {
        // Expiry is part of the predicate: an expired row is invisible
        // here and indistinguishable from an absent one
        let query = r#"
            SELECT id, identifier, value, created_at, expires_at
            FROM verification_codes
            WHERE identifier = ? AND expires_at > ?
        "#;

        let rows = sqlx::query(query)
            .bind(identifier)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to load verification codes: {}", e)))?;

        rows.iter().map(Self::row_to_code).collect()
    }

    async fn delete_by_identifier(&self, identifier: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE identifier = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete verification codes: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to sweep verification codes: {}", e)))?;

        Ok(result.rows_affected())
    }
}
