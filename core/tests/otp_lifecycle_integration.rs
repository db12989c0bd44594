//! Integration tests for the OTP lifecycle over the in-memory mocks.
//!
//! These walk the full issue → validate → sweep flow the way the API
//! layer drives it, without any HTTP in between.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tb_core::domain::entities::user::User;
use tb_core::domain::entities::verification_code::VerificationCode;
use tb_core::errors::{AuthError, DomainError};
use tb_core::repositories::{
    MockUserRepository, MockVerificationCodeRepository, UserRepository,
    VerificationCodeRepository,
};
use tb_core::services::verification::{MockEmailService, OtpService, VerificationConfig};

type TestOtpService =
    OtpService<MockVerificationCodeRepository, MockUserRepository, MockEmailService>;

struct Harness {
    service: TestOtpService,
    codes: Arc<MockVerificationCodeRepository>,
    users: Arc<MockUserRepository>,
    mailer: Arc<MockEmailService>,
}

fn harness() -> Harness {
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = OtpService::new(
        codes.clone(),
        users.clone(),
        mailer.clone(),
        VerificationConfig::default(),
    );
    Harness {
        service,
        codes,
        users,
        mailer,
    }
}

#[tokio::test]
async fn issue_then_validate_scenario() {
    let h = harness();
    h.users.insert(User::new("a@x.com", "A")).await;

    // Issue: one row exists, 6 digits, expiring ~10 minutes out
    h.service.issue("a@x.com").await.unwrap();
    let active = h.codes.find_active("a@x.com", Utc::now()).await.unwrap();
    assert_eq!(active.len(), 1);
    let row = &active[0];
    assert_eq!(row.value.len(), 6);
    assert!(row.value.chars().all(|c| c.is_ascii_digit()));
    let ttl = row.expires_at - Utc::now();
    assert!(ttl <= Duration::minutes(10));
    assert!(ttl > Duration::minutes(9));

    // The emailed code matches the stored one
    let emailed = h.mailer.last_code_for("a@x.com").await.unwrap();
    assert_eq!(emailed, row.value);

    // Wrong code: same error, row still present, user untouched
    let wrong = if emailed == "999999" { "999998" } else { "999999" };
    let err = h.service.validate("a@x.com", wrong).await;
    assert!(matches!(
        err,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
    assert_eq!(h.codes.count_for("a@x.com").await, 1);
    let user = h.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(!user.email_verified);

    // Correct code: verified, zero rows remain
    h.service.validate("a@x.com", &emailed).await.unwrap();
    let user = h.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(user.email_verified);
    assert_eq!(h.codes.count_for("a@x.com").await, 0);

    // The code is one-time: replaying it fails
    let err = h.service.validate("a@x.com", &emailed).await;
    assert!(matches!(
        err,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
}

#[tokio::test]
async fn issue_twice_only_newest_code_validates() {
    let h = harness();
    h.users.insert(User::new("a@x.com", "A")).await;

    h.service.issue("a@x.com").await.unwrap();
    let first = h.mailer.last_code_for("a@x.com").await.unwrap();

    h.service.issue("a@x.com").await.unwrap();
    let second = h.mailer.last_code_for("a@x.com").await.unwrap();

    assert_eq!(h.codes.count_for("a@x.com").await, 1);

    if first != second {
        let err = h.service.validate("a@x.com", &first).await;
        assert!(matches!(
            err,
            Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
        ));
    }

    h.service.validate("a@x.com", &second).await.unwrap();
}

#[tokio::test]
async fn resend_preconditions_and_supersede() {
    let h = harness();

    // No user
    let err = h.service.resend("ghost@x.com").await;
    assert!(matches!(
        err,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
    assert_eq!(h.mailer.sent().await.len(), 0);

    // Unverified user: resend works and supersedes
    h.users.insert(User::new("a@x.com", "A")).await;
    h.service.issue("a@x.com").await.unwrap();
    h.service.resend("a@x.com").await.unwrap();
    assert_eq!(h.codes.count_for("a@x.com").await, 1);

    // Verified user: AlreadyVerified, no new code
    let code = h.mailer.last_code_for("a@x.com").await.unwrap();
    h.service.validate("a@x.com", &code).await.unwrap();
    let sent_before = h.mailer.sent().await.len();
    let err = h.service.resend("a@x.com").await;
    assert!(matches!(
        err,
        Err(DomainError::Auth(AuthError::AlreadyVerified))
    ));
    assert_eq!(h.mailer.sent().await.len(), sent_before);
}

#[tokio::test]
async fn sweep_deletes_exactly_the_expired_rows() {
    let h = harness();

    h.codes
        .insert(VerificationCode::new_with_expiration("old@x.com", -30))
        .await
        .unwrap();
    h.codes
        .insert(VerificationCode::new_with_expiration("older@x.com", -120))
        .await
        .unwrap();
    h.codes
        .insert(VerificationCode::new("fresh@x.com"))
        .await
        .unwrap();

    assert_eq!(h.service.sweep().await.unwrap(), 2);
    assert_eq!(h.codes.count_for("fresh@x.com").await, 1);

    // Idempotent: an immediate second sweep is a no-op
    assert_eq!(h.service.sweep().await.unwrap(), 0);
}

#[tokio::test]
async fn validate_with_no_issued_code_fails_cleanly() {
    let h = harness();
    h.users.insert(User::new("a@x.com", "A")).await;

    let err = h.service.validate("a@x.com", "123456").await;
    assert!(matches!(
        err,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
}
