//! # Rate Limiter
//!
//! Per-caller token buckets behind a single coarse lock, with a background
//! sweep that reclaims buckets of callers that went quiet.
//!
//! Buckets are created lazily on a caller's first request and refilled
//! lazily on each check; nothing ticks per bucket. The one global lock is a
//! deliberate simplicity/contention trade-off: bucket creation is rare
//! relative to the check path, and `allow` holds the lock only for a map
//! lookup and a little arithmetic.
//!
//! Denial is a normal `false` return, never an error.

mod config;

pub use config::LimiterConfig;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};
use tokio::sync::watch;

struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

impl Bucket {
    /// Credit whole refill units elapsed since `last_refill`, capped at
    /// `capacity`. `last_refill` advances by the consumed whole intervals so
    /// fractional credit is preserved; once full, the anchor resets to `now`.
    fn refill(&mut self, now: Instant, interval: Duration, capacity: u32) {
        if interval.is_zero() {
            self.tokens = capacity;
            self.last_refill = now;
            return;
        }
        let elapsed = now.duration_since(self.last_refill);
        let units = elapsed.as_nanos() / interval.as_nanos();
        if units == 0 {
            return;
        }
        if units >= u128::from(capacity - self.tokens) {
            self.tokens = capacity;
            self.last_refill = now;
        } else {
            let units = units as u32;
            self.tokens += units;
            self.last_refill += interval * units;
        }
    }
}

struct Shared {
    buckets: Mutex<HashMap<i64, Bucket>>,
    refill_interval: Duration,
    capacity: u32,
    stopped: AtomicBool,
    shutdown: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, HashMap<i64, Bucket>> {
        // Bucket arithmetic cannot leave the map in an invalid state, so a
        // poisoned lock is still safe to reuse.
        match self.buckets.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn sweep(&self, retention: Duration) -> usize {
        let now = Instant::now();
        let mut buckets = self.lock();
        let before = buckets.len();
        buckets.retain(|_, bucket| now.duration_since(bucket.last_refill) <= retention);
        before - buckets.len()
    }
}

/// A concurrency-safe token-bucket rate limiter keyed by caller id.
///
/// Cloning yields another handle to the same bucket map. Construction spawns
/// the background sweep task and therefore must happen inside a Tokio
/// runtime; the task holds only a weak reference, so dropping every handle
/// ends it even without an explicit [`stop`](RateLimiter::stop).
#[derive(Clone)]
pub struct RateLimiter {
    shared: Arc<Shared>,
}

impl RateLimiter {
    /// Limiter with the given bucket shape and default sweep settings.
    pub fn new(refill_interval: Duration, capacity: u32) -> Self {
        Self::with_config(LimiterConfig::new(refill_interval, capacity))
    }

    /// Limiter with explicit sweep settings.
    pub fn with_config(config: LimiterConfig) -> Self {
        let (shutdown, signal) = watch::channel(false);
        let shared = Arc::new(Shared {
            buckets: Mutex::new(HashMap::new()),
            refill_interval: config.refill_interval,
            capacity: config.capacity,
            stopped: AtomicBool::new(false),
            shutdown,
        });
        tokio::spawn(run_sweeper(
            Arc::downgrade(&shared),
            signal,
            config.sweep_interval,
            config.retention,
        ));
        Self { shared }
    }

    /// Whether `caller` may proceed right now.
    ///
    /// The first request from a caller always succeeds and leaves
    /// `capacity - 1` tokens behind. Never errors: denial is `false`.
    pub fn allow(&self, caller: i64) -> bool {
        let now = Instant::now();
        let mut buckets = self.shared.lock();
        match buckets.entry(caller) {
            Entry::Vacant(slot) => {
                slot.insert(Bucket {
                    tokens: self.shared.capacity.saturating_sub(1),
                    last_refill: now,
                });
                true
            }
            Entry::Occupied(mut slot) => {
                let bucket = slot.get_mut();
                bucket.refill(now, self.shared.refill_interval, self.shared.capacity);
                if bucket.tokens > 0 {
                    bucket.tokens -= 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Terminate the background sweep. Idempotent: the second call is a
    /// no-op, not a fault.
    pub fn stop(&self) {
        if !self.shared.stopped.swap(true, Ordering::SeqCst) {
            let _ = self.shared.shutdown.send(true);
        }
    }

    /// The number of live buckets (callers seen and not yet reclaimed).
    pub fn bucket_count(&self) -> usize {
        self.shared.lock().len()
    }
}

async fn run_sweeper(
    shared: Weak<Shared>,
    mut shutdown: watch::Receiver<bool>,
    sweep_interval: Duration,
    retention: Duration,
) {
    let mut tick = tokio::time::interval(sweep_interval);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let Some(shared) = shared.upgrade() else { break };
                let removed = shared.sweep(retention);
                if removed > 0 {
                    tracing::trace!(removed, "reclaimed idle rate-limit buckets");
                }
            }
            _ = shutdown.changed() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn burst_up_to_capacity_then_denied() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3);
        assert!(limiter.allow(1));
        assert!(limiter.allow(1));
        assert!(limiter.allow(1));
        assert!(!limiter.allow(1));
    }

    #[tokio::test]
    async fn callers_have_independent_buckets() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        assert!(limiter.allow(1));
        assert!(!limiter.allow(1));
        assert!(limiter.allow(2));
        assert_eq!(limiter.bucket_count(), 2);
    }

    #[tokio::test]
    async fn one_interval_regenerates_exactly_one_token() {
        let limiter = RateLimiter::new(Duration::from_millis(40), 2);
        assert!(limiter.allow(7));
        assert!(limiter.allow(7));
        assert!(!limiter.allow(7));

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert!(limiter.allow(7));
        assert!(!limiter.allow(7));
    }

    #[tokio::test]
    async fn refill_is_capped_at_capacity() {
        let limiter = RateLimiter::new(Duration::from_millis(5), 2);
        assert!(limiter.allow(7));
        tokio::time::sleep(Duration::from_millis(60)).await;
        // Far more than two intervals elapsed; still only capacity tokens.
        assert!(limiter.allow(7));
        assert!(limiter.allow(7));
        assert!(!limiter.allow(7));
    }

    #[tokio::test]
    async fn sweep_reclaims_idle_buckets() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        assert!(limiter.allow(1));
        assert_eq!(limiter.bucket_count(), 1);

        std::thread::sleep(Duration::from_millis(10));
        let removed = limiter.shared.sweep(Duration::from_millis(1));
        assert_eq!(removed, 1);
        assert_eq!(limiter.bucket_count(), 0);
    }

    #[tokio::test]
    async fn background_sweeper_runs() {
        let config = LimiterConfig::new(Duration::from_secs(60), 1)
            .sweep_interval(Duration::from_millis(10))
            .retention(Duration::from_millis(1));
        let limiter = RateLimiter::with_config(config);
        assert!(limiter.allow(1));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(limiter.bucket_count(), 0);
        limiter.stop();
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let limiter = RateLimiter::new(Duration::from_secs(1), 1);
        limiter.stop();
        limiter.stop();
    }

    #[tokio::test]
    async fn concurrent_callers_get_exactly_capacity_tokens() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 8);
        let mut joins = Vec::new();
        for _ in 0..4 {
            let limiter = limiter.clone();
            joins.push(std::thread::spawn(move || {
                (0..8).filter(|_| limiter.allow(42)).count()
            }));
        }
        let allowed: usize = joins.into_iter().map(|j| j.join().unwrap()).sum();
        assert_eq!(allowed, 8);
    }
}
