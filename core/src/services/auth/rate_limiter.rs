//! Rate limiting trait and in-memory fixed-window implementation
//!
//! The OTP resend endpoint is guarded by a fixed window keyed on the
//! client address. The limiter is an external collaborator: the OTP
//! service never consults it and must stay correct when called without
//! it (as the service tests do).

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request may proceed
    Allowed { remaining: u32 },
    /// The fixed window is exhausted
    Limited { retry_after_seconds: u64 },
}

/// Rate limiting service trait
///
/// Errors are plain strings; callers treat a limiter failure as
/// fail-open so an unavailable backend cannot take the endpoint down.
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Record a hit for `key` and decide whether it may proceed
    async fn check(&self, key: &str) -> Result<RateLimitDecision, String>;
}

/// In-memory fixed-window limiter
///
/// Suitable for tests and single-process deployments; the Redis-backed
/// implementation in the infrastructure crate serves multi-instance
/// setups.
pub struct InMemoryRateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, WindowState>>,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    started_at: Instant,
    count: u32,
}

impl InMemoryRateLimiter {
    /// Create a limiter allowing `max_requests` per `window` per key
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitDecision, String> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        // Drop windows that ended, keeping the map bounded by live keys
        windows.retain(|_, w| now.duration_since(w.started_at) < self.window);

        let state = windows.entry(key.to_string()).or_insert(WindowState {
            started_at: now,
            count: 0,
        });

        if state.count >= self.max_requests {
            let elapsed = now.duration_since(state.started_at);
            let retry_after = self.window.saturating_sub(elapsed);
            return Ok(RateLimitDecision::Limited {
                retry_after_seconds: retry_after.as_secs().max(1),
            });
        }

        state.count += 1;
        Ok(RateLimitDecision::Allowed {
            remaining: self.max_requests - state.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_up_to_limit_then_blocks() {
        let limiter = InMemoryRateLimiter::new(5, Duration::from_secs(900));

        for i in 0..5 {
            let decision = limiter.check("10.0.0.1").await.unwrap();
            assert_eq!(
                decision,
                RateLimitDecision::Allowed {
                    remaining: 5 - i - 1
                }
            );
        }

        match limiter.check("10.0.0.1").await.unwrap() {
            RateLimitDecision::Limited {
                retry_after_seconds,
            } => assert!(retry_after_seconds > 0 && retry_after_seconds <= 900),
            other => panic!("expected Limited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = InMemoryRateLimiter::new(1, Duration::from_secs(60));

        assert!(matches!(
            limiter.check("10.0.0.1").await.unwrap(),
            RateLimitDecision::Allowed { .. }
        ));
        assert!(matches!(
            limiter.check("10.0.0.2").await.unwrap(),
            RateLimitDecision::Allowed { .. }
        ));
        assert!(matches!(
            limiter.check("10.0.0.1").await.unwrap(),
            RateLimitDecision::Limited { .. }
        ));
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = InMemoryRateLimiter::new(1, Duration::from_millis(20));

        assert!(matches!(
            limiter.check("k").await.unwrap(),
            RateLimitDecision::Allowed { .. }
        ));
        assert!(matches!(
            limiter.check("k").await.unwrap(),
            RateLimitDecision::Limited { .. }
        ));

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(matches!(
            limiter.check("k").await.unwrap(),
            RateLimitDecision::Allowed { .. }
        ));
    }
}
