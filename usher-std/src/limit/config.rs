//! Rate limiter configuration.

use std::time::Duration;

/// Construction parameters for a [`RateLimiter`](super::RateLimiter).
///
/// `refill_interval` and `capacity` shape the per-caller bucket; the sweep
/// settings are independent of request traffic and only bound memory growth
/// from one-off callers.
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    /// Time for one token to regenerate.
    pub refill_interval: Duration,
    /// Maximum burst size of a bucket.
    pub capacity: u32,
    /// How often the background sweep runs.
    pub sweep_interval: Duration,
    /// How long an untouched bucket is kept before the sweep removes it.
    pub retention: Duration,
}

impl LimiterConfig {
    /// Config with the given bucket shape and the default sweep settings
    /// (hourly sweep, 24 h retention).
    pub fn new(refill_interval: Duration, capacity: u32) -> Self {
        Self {
            refill_interval,
            capacity,
            sweep_interval: Duration::from_secs(60 * 60),
            retention: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Override how often the background sweep runs.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Override how long idle buckets are retained.
    pub fn retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }
}
