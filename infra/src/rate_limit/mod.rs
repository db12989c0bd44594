//! Rate limiter implementations

mod redis_limiter;

pub use redis_limiter::RedisRateLimiter;
