//! Mock email service for tests and local development

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::EmailServiceTrait;

/// Recorded outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub code: String,
}

/// In-memory email service that records every send
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: bool,
}

impl MockEmailService {
    /// Create a mock that accepts every send
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every send fails
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    /// All emails recorded so far
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    /// The code most recently sent to an address
    pub async fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|e| e.to == to)
            .map(|e| e.code.clone())
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<String, String> {
        if self.fail {
            return Err("mock email service configured to fail".to_string());
        }
        let mut sent = self.sent.write().await;
        sent.push(SentEmail {
            to: to.to_string(),
            code: code.to_string(),
        });
        Ok(format!("mock-{}", sent.len()))
    }
}
