//! Authentication gateway module
//!
//! The gateway is a thin boundary: credential storage, password
//! hashing, and session issuance all belong to the [`AuthProvider`]
//! capability, whose production implementation lives in the
//! infrastructure crate. The one thing the gateway adds is the hook
//! that issues an email OTP on sign-up in place of any link-based
//! verification.

mod gateway;
mod provider;
mod rate_limiter;

pub use gateway::AuthGateway;
pub use provider::{
    AuthProvider, AuthSession, Credentials, NewUser, ProtocolRequest, ProtocolResponse, Session,
};
pub use rate_limiter::{InMemoryRateLimiter, RateLimitDecision, RateLimiterTrait};
