use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::warn;
use parking_lot::Mutex;

use crate::config::{RATE_LIMIT, RATE_LIMIT_WINDOW};

struct RateRecord {
    count: u32,
    window_start: Instant,
}

/// Fixed-window request counter keyed by Discord user id.
///
/// The window boundary is a hard cliff: a user can spend their whole budget
/// at the end of one window and again right after it resets. Entries are
/// never evicted; the map grows with the number of distinct users seen.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    records: Mutex<HashMap<u64, RateRecord>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(RATE_LIMIT, RATE_LIMIT_WINDOW)
    }

    pub fn with_limits(limit: u32, window: Duration) -> Self {
        RateLimiter {
            limit,
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true if the user may make a request, consuming one slot.
    /// A denied call does not mutate the record.
    pub fn check(&self, user_id: u64) -> bool {
        self.check_at(user_id, Instant::now())
    }

    /// Requests the user has left in the current window.
    pub fn remaining(&self, user_id: u64) -> u32 {
        self.remaining_at(user_id, Instant::now())
    }

    /// Time until the user's window resets. Zero for unseen users or
    /// expired windows.
    pub fn reset_in(&self, user_id: u64) -> Duration {
        self.reset_in_at(user_id, Instant::now())
    }

    fn check_at(&self, user_id: u64, now: Instant) -> bool {
        let mut records = self.records.lock();
        let record = records.entry(user_id).or_insert(RateRecord {
            count: 0,
            window_start: now,
        });

        if now.duration_since(record.window_start) > self.window {
            record.count = 1;
            record.window_start = now;
        } else if record.count >= self.limit {
            warn!("Rate limit exceeded for user {}", user_id);
            return false;
        } else {
            record.count += 1;
        }

        true
    }

    fn remaining_at(&self, user_id: u64, now: Instant) -> u32 {
        let records = self.records.lock();
        match records.get(&user_id) {
            Some(record) if now.duration_since(record.window_start) <= self.window => {
                self.limit.saturating_sub(record.count)
            }
            _ => self.limit,
        }
    }

    fn reset_in_at(&self, user_id: u64, now: Instant) -> Duration {
        let records = self.records.lock();
        records
            .get(&user_id)
            .map(|record| self.window.saturating_sub(now.duration_since(record.window_start)))
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn allows_up_to_limit_within_window() {
        let limiter = RateLimiter::with_limits(5, WINDOW);
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at(1, now));
        }
        assert!(!limiter.check_at(1, now));
    }

    #[test]
    fn window_expiry_resets_count_to_one() {
        let limiter = RateLimiter::with_limits(2, WINDOW);
        let start = Instant::now();

        assert!(limiter.check_at(1, start));
        assert!(limiter.check_at(1, start));
        assert!(!limiter.check_at(1, start));

        let later = start + WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at(1, later));
        assert_eq!(limiter.remaining_at(1, later), 1);
    }

    #[test]
    fn boundary_is_a_hard_cliff() {
        let limiter = RateLimiter::with_limits(2, WINDOW);
        let start = Instant::now();

        assert!(limiter.check_at(1, start));
        assert!(limiter.check_at(1, start));
        // Exactly at the window edge the old window still applies.
        assert!(!limiter.check_at(1, start + WINDOW));
        // One past it, the full budget is back: 2x the limit in a short span.
        let after = start + WINDOW + Duration::from_millis(1);
        assert!(limiter.check_at(1, after));
        assert!(limiter.check_at(1, after));
    }

    #[test]
    fn remaining_decrements_per_allowed_call() {
        let limiter = RateLimiter::with_limits(3, WINDOW);
        let now = Instant::now();

        assert_eq!(limiter.remaining_at(1, now), 3);
        assert!(limiter.check_at(1, now));
        assert_eq!(limiter.remaining_at(1, now), 2);
        assert!(limiter.check_at(1, now));
        assert_eq!(limiter.remaining_at(1, now), 1);
        assert!(limiter.check_at(1, now));
        assert_eq!(limiter.remaining_at(1, now), 0);

        let later = now + WINDOW + Duration::from_secs(1);
        assert_eq!(limiter.remaining_at(1, later), 3);
    }

    #[test]
    fn denied_calls_do_not_consume_or_extend_the_window() {
        let limiter = RateLimiter::with_limits(1, WINDOW);
        let start = Instant::now();

        assert!(limiter.check_at(1, start));
        assert!(!limiter.check_at(1, start + Duration::from_secs(30)));
        // The window still runs from the first request, not the denial.
        assert!(limiter.check_at(1, start + WINDOW + Duration::from_secs(1)));
    }

    #[test]
    fn unseen_user_has_full_budget_and_no_pending_reset() {
        let limiter = RateLimiter::with_limits(5, WINDOW);
        let now = Instant::now();

        assert_eq!(limiter.remaining_at(42, now), 5);
        assert_eq!(limiter.reset_in_at(42, now), Duration::ZERO);
    }

    #[test]
    fn reset_in_counts_down_and_bottoms_out_at_zero() {
        let limiter = RateLimiter::with_limits(5, WINDOW);
        let start = Instant::now();

        assert!(limiter.check_at(1, start));
        assert_eq!(limiter.reset_in_at(1, start + Duration::from_secs(20)), Duration::from_secs(40));
        assert_eq!(limiter.reset_in_at(1, start + WINDOW + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn users_are_isolated() {
        let limiter = RateLimiter::with_limits(1, WINDOW);
        let now = Instant::now();

        assert!(limiter.check_at(1, now));
        assert!(limiter.check_at(2, now));
        assert!(!limiter.check_at(1, now));
        assert!(!limiter.check_at(2, now));
    }
}
