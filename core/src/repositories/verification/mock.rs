//! Mock implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// In-memory verification code repository for tests
#[derive(Clone, Default)]
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<Vec<VerificationCode>>>,
}

impl MockVerificationCodeRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows currently stored, expired ones included
    pub async fn all(&self) -> Vec<VerificationCode> {
        self.codes.read().await.clone()
    }

    /// Number of rows stored for an identifier, expired ones included
    pub async fn count_for(&self, identifier: &str) -> usize {
        self.codes
            .read()
            .await
            .iter()
            .filter(|c| c.identifier == identifier)
            .count()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn insert(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        self.codes.write().await.push(code.clone());
        Ok(code)
    }

    async fn find_active(
        &self,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .iter()
            .filter(|c| c.identifier == identifier && c.expires_at > now)
            .cloned()
            .collect())
    }

    async fn delete_by_identifier(&self, identifier: &str) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|c| c.identifier != identifier);
        Ok((before - codes.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|c| c.expires_at > now);
        Ok((before - codes.len()) as u64)
    }
}
