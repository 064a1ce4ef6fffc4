//! Outbound call throttling for the geocoding service
//!
//! A single-cell token bucket: one call is allowed immediately, every later call
//! waits until `interval` has elapsed since the previous one was admitted.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;

/// Minimum gap between geocoding requests (one per second)
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Serialising throttle for outbound geocoding calls.
///
/// A zero interval disables throttling entirely.
pub struct Throttle {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    interval: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl Throttle {
    /// Create a throttle admitting one call per `interval`.
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval)
            .map(|quota| quota.allow_burst(NonZeroU32::MIN))
            .map(RateLimiter::direct);

        Self { limiter, interval }
    }

    /// A throttle that never waits
    #[allow(dead_code)]
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Configured minimum gap between calls
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether calls are being spaced at all
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Wait until the next call is allowed, then claim the slot.
    pub async fn acquire(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };

        if limiter.check().is_err() {
            debug!("Throttling geocoding request ({:?} minimum gap)", self.interval);
            limiter.until_ready().await;
        }
    }
}
