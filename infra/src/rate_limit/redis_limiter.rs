//! Redis fixed-window rate limiter
//!
//! INCR + EXPIRE on a per-key counter. The first hit in a window creates
//! the key with the window TTL; once the counter passes the limit the
//! remaining TTL becomes the retry-after hint.

use async_trait::async_trait;
use redis::AsyncCommands;
use std::sync::Arc;

use tb_core::services::auth::{RateLimitDecision, RateLimiterTrait};

/// Redis-backed fixed-window limiter
pub struct RedisRateLimiter {
    client: Arc<redis::Client>,
    max_requests: u32,
    window_seconds: u64,
}

impl RedisRateLimiter {
    /// Create a limiter allowing `max_requests` per `window_seconds` per key
    pub fn new(
        redis_url: &str,
        max_requests: u32,
        window_seconds: u64,
    ) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self {
            client: Arc::new(client),
            max_requests,
            window_seconds,
        })
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitDecision, String> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Redis connection error: {}", e))?;

        let redis_key = format!("rate_limit:{}", key);

        let count: u32 = conn
            .incr(&redis_key, 1)
            .await
            .map_err(|e| format!("Redis INCR error: {}", e))?;

        if count == 1 {
            // First hit opens the window
            let _: () = conn
                .expire(&redis_key, self.window_seconds as i64)
                .await
                .map_err(|e| format!("Redis EXPIRE error: {}", e))?;
        }

        if count > self.max_requests {
            let ttl: i64 = conn
                .ttl(&redis_key)
                .await
                .map_err(|e| format!("Redis TTL error: {}", e))?;

            return Ok(RateLimitDecision::Limited {
                retry_after_seconds: ttl.max(1) as u64,
            });
        }

        Ok(RateLimitDecision::Allowed {
            remaining: self.max_requests - count,
        })
    }
}
