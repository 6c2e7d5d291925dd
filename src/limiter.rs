//! Per-client request rate limiting
//!
//! Counts requests per client over a fixed window and places offenders in a
//! temporary block. The block clears lazily: expiry is checked on the next
//! admit call rather than by a scheduled timer, so the limiter needs no
//! background tasks and tests can drive it with explicit instants.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Decision about whether a request is admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmitDecision {
    /// Request counted and admitted
    Admitted,
    /// This request pushed the client over the window threshold
    LimitExceeded,
    /// Client is inside an active block period
    Blocked,
}

impl AdmitDecision {
    /// Helper to check if admitted
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmitDecision::Admitted)
    }
}

/// Per-client quota state
#[derive(Debug, Clone)]
struct ClientQuota {
    /// Requests counted in the current window
    count: u32,
    /// When the current window ends
    window_reset_at: Instant,
    /// Active block, cleared on read once the instant passes
    blocked_until: Option<Instant>,
}

/// Configuration for the rate limiter
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Length of the counting window
    pub window: Duration,
    /// Requests admitted per window before blocking
    pub max_requests_per_window: u32,
    /// How long an offending client stays blocked
    pub block_duration: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_requests_per_window: 10,
            block_duration: Duration::from_secs(10 * 60),
        }
    }
}

/// Sliding-window rate limiter keyed by client id (best-effort IP).
///
/// Quota entries are never evicted; the map grows with the number of
/// distinct clients seen over the process lifetime.
pub struct RateLimiter {
    quotas: HashMap<String, ClientQuota>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            quotas: HashMap::new(),
            config,
        }
    }

    /// Count a request from `client_id` at `now` and decide its fate.
    ///
    /// While a block is active the quota is left untouched: no count
    /// mutation and no window reset. Once the block instant passes, the
    /// next request is admitted and starts a fresh window with count 1.
    pub fn admit(&mut self, client_id: &str, now: Instant) -> AdmitDecision {
        let quota = match self.quotas.entry(client_id.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(ClientQuota {
                    count: 1,
                    window_reset_at: now + self.config.window,
                    blocked_until: None,
                });
                return AdmitDecision::Admitted;
            }
            Entry::Occupied(entry) => entry.into_mut(),
        };

        if let Some(blocked_until) = quota.blocked_until {
            if now < blocked_until {
                return AdmitDecision::Blocked;
            }
            // Block expired: readmit with a fresh window
            quota.blocked_until = None;
            quota.count = 1;
            quota.window_reset_at = now + self.config.window;
            return AdmitDecision::Admitted;
        }

        if now > quota.window_reset_at {
            quota.count = 1;
            quota.window_reset_at = now + self.config.window;
            return AdmitDecision::Admitted;
        }

        quota.count += 1;
        if quota.count > self.config.max_requests_per_window {
            quota.blocked_until = Some(now + self.config.block_duration);
            tracing::warn!(client = client_id, "rate limit exceeded, client blocked");
            return AdmitDecision::LimitExceeded;
        }

        AdmitDecision::Admitted
    }

    /// Number of distinct clients tracked
    pub fn tracked_clients(&self) -> usize {
        self.quotas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(RateLimitConfig::default())
    }

    #[test]
    fn test_admits_up_to_threshold() {
        let mut limiter = limiter();
        let now = Instant::now();

        for _ in 0..10 {
            assert_eq!(limiter.admit("1.2.3.4", now), AdmitDecision::Admitted);
        }
        assert_eq!(limiter.admit("1.2.3.4", now), AdmitDecision::LimitExceeded);
    }

    #[test]
    fn test_block_persists_across_window_expiry() {
        let mut limiter = limiter();
        let now = Instant::now();

        for _ in 0..10 {
            limiter.admit("1.2.3.4", now);
        }
        assert_eq!(limiter.admit("1.2.3.4", now), AdmitDecision::LimitExceeded);

        // Two windows later the block is still in force
        let later = now + Duration::from_secs(180);
        assert_eq!(limiter.admit("1.2.3.4", later), AdmitDecision::Blocked);
    }

    #[test]
    fn test_block_clears_after_duration_with_fresh_window() {
        let mut limiter = limiter();
        let now = Instant::now();

        for _ in 0..11 {
            limiter.admit("1.2.3.4", now);
        }

        let after_block = now + Duration::from_secs(10 * 60) + Duration::from_secs(1);
        assert_eq!(limiter.admit("1.2.3.4", after_block), AdmitDecision::Admitted);

        // Fresh window: nine more fit before the threshold trips again
        for _ in 0..9 {
            assert_eq!(limiter.admit("1.2.3.4", after_block), AdmitDecision::Admitted);
        }
        assert_eq!(
            limiter.admit("1.2.3.4", after_block),
            AdmitDecision::LimitExceeded
        );
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let mut limiter = limiter();
        let now = Instant::now();

        for _ in 0..10 {
            limiter.admit("1.2.3.4", now);
        }

        let next_window = now + Duration::from_secs(61);
        assert_eq!(limiter.admit("1.2.3.4", next_window), AdmitDecision::Admitted);
    }

    #[test]
    fn test_clients_are_independent() {
        let mut limiter = limiter();
        let now = Instant::now();

        for _ in 0..11 {
            limiter.admit("1.2.3.4", now);
        }
        assert_eq!(limiter.admit("5.6.7.8", now), AdmitDecision::Admitted);
        assert_eq!(limiter.tracked_clients(), 2);
    }
}
