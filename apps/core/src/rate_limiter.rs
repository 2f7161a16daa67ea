use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// A sliding window rate limiter keyed by client identifier.
///
/// Each client gets a queue of request timestamps. On every check the queue is
/// pruned down to the window before the limit is applied, so long-idle clients
/// never accumulate stale entries.
pub struct RateLimiter {
    /// Request timestamps per client, oldest first.
    clients: HashMap<String, VecDeque<Instant>>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter` allowing `limit` requests per `window`.
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            clients: HashMap::new(),
            limit,
            window,
        }
    }

    /// Checks whether a request from `client_id` is allowed.
    ///
    /// Allowed requests are recorded; denied requests are not, so a client
    /// hammering the gateway does not extend its own penalty.
    pub fn check(&mut self, client_id: &str) -> bool {
        let now = Instant::now();
        let window_start = now - self.window;

        let timestamps = self.clients.entry(client_id.to_string()).or_default();

        while timestamps
            .front()
            .is_some_and(|&oldest| oldest <= window_start)
        {
            timestamps.pop_front();
        }

        if timestamps.len() < self.limit {
            timestamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// How long until the next slot frees up for `client_id`, if it is
    /// currently saturated.
    pub fn retry_after(&self, client_id: &str) -> Option<Duration> {
        let timestamps = self.clients.get(client_id)?;
        if timestamps.len() < self.limit {
            return None;
        }
        let oldest = *timestamps.front()?;
        Some(self.window.saturating_sub(oldest.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_allows_requests_within_limit() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        for _ in 0..5 {
            assert!(limiter.check("client1"));
        }
        assert!(!limiter.check("client1"));
    }

    #[test]
    fn test_resets_after_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.check("client2"));
        assert!(limiter.check("client2"));
        assert!(!limiter.check("client2"));

        thread::sleep(Duration::from_millis(60));

        assert!(limiter.check("client2"));
    }

    #[test]
    fn test_clients_are_independent() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        assert!(limiter.check("a"));
        assert!(limiter.check("b"));
        assert!(!limiter.check("a"));
    }

    #[test]
    fn test_retry_after_only_when_saturated() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(10));
        assert!(limiter.retry_after("c").is_none());

        assert!(limiter.check("c"));
        let wait = limiter.retry_after("c").expect("saturated client");
        assert!(wait <= Duration::from_secs(10));
    }
}
