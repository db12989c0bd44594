//! Business services containing domain logic and use cases.

pub mod auth;
pub mod todo;
pub mod verification;

// Re-export commonly used types
pub use auth::{
    AuthGateway, AuthProvider, AuthSession, Credentials, InMemoryRateLimiter, NewUser,
    ProtocolRequest, ProtocolResponse, RateLimitDecision, RateLimiterTrait, Session,
};
pub use todo::{TodoService, TodoUpdate};
pub use verification::{
    CodeSweeper, EmailServiceTrait, IssueCodeResult, MockEmailService, OtpService,
    SweeperHandle, VerificationConfig,
};
