//! Resend email service implementation
//!
//! Drives the Resend HTTP API (or any provider with the same surface)
//! to deliver verification codes. No retry logic: a failed dispatch
//! fails the whole Issue/Resend operation visibly, and the user retries.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use tb_core::services::verification::EmailServiceTrait;
use tb_shared::config::EmailConfig;
use tb_shared::utils::email::{is_valid_email, mask_email};

use crate::InfrastructureError;

/// Response payload of a successful send
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Resend email service
pub struct ResendEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl ResendEmailService {
    /// Create a new email service
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Email(format!("Failed to build client: {}", e)))?;

        info!(
            from = %config.from_address,
            "Email service initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(EmailConfig::from_env())
    }

    fn verification_subject() -> &'static str {
        "Your Tickbox verification code"
    }

    fn verification_body(code: &str) -> String {
        format!(
            "<p>Your verification code is <strong>{}</strong>.</p>\
             <p>It expires in 10 minutes. If you did not request it, you can ignore this email.</p>",
            code
        )
    }
}

#[async_trait]
impl EmailServiceTrait for ResendEmailService {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<String, String> {
        if !is_valid_email(to) {
            return Err(format!("Invalid recipient address: {}", mask_email(to)));
        }

        debug!(to = %mask_email(to), "Sending verification email");

        let payload = serde_json::json!({
            "from": self.config.from_address,
            "to": [to],
            "subject": Self::verification_subject(),
            "html": Self::verification_body(code),
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(to = %mask_email(to), error = %e, "Email API request failed");
                format!("Email API request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                to = %mask_email(to),
                status = %status,
                "Email API returned an error"
            );
            return Err(format!("Email API returned {}: {}", status, body));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse email API response: {}", e))?;

        info!(
            to = %mask_email(to),
            message_id = %parsed.id,
            "Verification email dispatched"
        );

        Ok(parsed.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_contains_code() {
        let body = ResendEmailService::verification_body("482913");
        assert!(body.contains("482913"));
        assert!(body.contains("10 minutes"));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = EmailConfig {
            api_key: String::new(),
            ..EmailConfig::default()
        };
        assert!(matches!(
            ResendEmailService::new(config),
            Err(InfrastructureError::Config(_))
        ));
    }
}
