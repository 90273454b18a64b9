//! Wall-clock budget shared by every strategy that can be asked to stop early.

use std::time::{Duration, Instant};

/// A monotonic time budget. Cheap to copy; strategies check `is_over` in
/// their inner loops instead of threading a deadline parameter everywhere.
#[derive(Debug, Clone, Copy)]
pub struct TimeLimiter {
    start: Instant,
    limit: Duration,
}

impl TimeLimiter {
    /// Create a limiter with `limit_seconds` remaining, not yet started.
    pub fn new(limit_seconds: f64) -> Self {
        TimeLimiter {
            start: Instant::now(),
            limit: Duration::from_secs_f64(limit_seconds.max(0.0)),
        }
    }

    /// Reset the clock to now, keeping the configured limit.
    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn is_over(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    /// Seconds left in the budget, clamped to zero.
    pub fn get_remaining(&self) -> f64 {
        let elapsed = self.start.elapsed();
        if elapsed >= self.limit {
            0.0
        } else {
            (self.limit - elapsed).as_secs_f64()
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn fresh_limiter_has_full_budget() {
        let limiter = TimeLimiter::new(10.0);
        assert!(!limiter.is_over());
        assert!(limiter.get_remaining() > 9.0);
    }

    #[test]
    fn zero_budget_is_immediately_over() {
        let limiter = TimeLimiter::new(0.0);
        assert!(limiter.is_over());
        assert_eq!(limiter.get_remaining(), 0.0);
    }

    #[test]
    fn remaining_shrinks_over_time() {
        let limiter = TimeLimiter::new(0.05);
        sleep(Duration::from_millis(60));
        assert!(limiter.is_over());
        assert_eq!(limiter.get_remaining(), 0.0);
    }
}
