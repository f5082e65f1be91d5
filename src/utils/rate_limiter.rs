use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use nonzero_ext::*;
use std::time::Duration;

/// Token-bucket limiter shared by all remote requests in a run. One token is
/// replenished per configured interval with a burst of one, so consecutive
/// requests are spaced at least the interval apart (the first request goes
/// through immediately).
pub struct RateLimiter {
    limiter: GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    interval: Duration,
}

impl RateLimiter {
    /// Create a limiter enforcing a minimum spacing between requests.
    /// A zero interval disables limiting (single-request quota per nanosecond
    /// is not representable, so fall back to a generous per-second quota).
    pub fn with_min_interval(interval: Duration) -> Self {
        let quota = Quota::with_period(interval)
            .unwrap_or_else(|| Quota::per_second(nonzero!(1000u32)))
            .allow_burst(nonzero!(1u32));

        Self {
            limiter: GovernorRateLimiter::direct(quota),
            interval,
        }
    }

    /// Suspend the calling task until the next request is allowed.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
