//! Sliding-window call accounting
//!
//! Pure bookkeeping for a per-provider quota: the caller supplies the current
//! instant and the window answers whether the call fits or how long to wait.
//! Sharing, locking and sleeping live in the shell.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Timestamps of admitted calls within the trailing period
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    limit: usize,
    period: Duration,
    calls: VecDeque<Instant>,
}

impl SlidingWindow {
    pub fn new(limit: u32, period: Duration) -> Result<Self> {
        if limit == 0 || period.is_zero() {
            return Err(Error::InvalidQuota { period });
        }

        Ok(Self {
            limit: limit as usize,
            period,
            calls: VecDeque::new(),
        })
    }

    /// Drop timestamps that no longer fall inside `(now - period, now]`
    fn evict(&mut self, now: Instant) {
        while let Some(&oldest) = self.calls.front() {
            if now.saturating_duration_since(oldest) >= self.period {
                self.calls.pop_front();
            } else {
                break;
            }
        }
    }

    /// Admit a call at `now`, or return how long until a slot frees up
    pub fn try_acquire(&mut self, now: Instant) -> std::result::Result<(), Duration> {
        self.evict(now);

        if self.calls.len() < self.limit {
            self.calls.push_back(now);
            return Ok(());
        }

        // Full window: the oldest call is the next to expire.
        let oldest = self.calls.front().copied().unwrap_or(now);
        let elapsed = now.saturating_duration_since(oldest);
        Err(self.period.saturating_sub(elapsed))
    }

    /// Calls still counted against the quota at `now`
    pub fn in_flight(&mut self, now: Instant) -> usize {
        self.evict(now);
        self.calls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_rejects_zero_limit() {
        assert_eq!(
            SlidingWindow::new(0, MINUTE).unwrap_err(),
            Error::InvalidQuota { period: MINUTE }
        );
        assert!(SlidingWindow::new(1, Duration::ZERO).is_err());
    }

    #[test]
    fn test_admits_up_to_limit() {
        let start = Instant::now();
        let mut window = SlidingWindow::new(3, MINUTE).unwrap();

        assert!(window.try_acquire(start).is_ok());
        assert!(window.try_acquire(start + Duration::from_secs(1)).is_ok());
        assert!(window.try_acquire(start + Duration::from_secs(2)).is_ok());
        assert_eq!(window.in_flight(start + Duration::from_secs(2)), 3);
    }

    #[test]
    fn test_largest_quota_is_accepted() {
        let start = Instant::now();
        let mut window = SlidingWindow::new(u32::MAX, MINUTE).unwrap();

        for step in 0..5u64 {
            assert!(window.try_acquire(start + Duration::from_secs(step)).is_ok());
        }
        assert_eq!(window.in_flight(start + Duration::from_secs(5)), 5);
    }

    #[test]
    fn test_over_limit_reports_wait_for_oldest() {
        let start = Instant::now();
        let mut window = SlidingWindow::new(2, MINUTE).unwrap();

        window.try_acquire(start).unwrap();
        window.try_acquire(start + Duration::from_secs(10)).unwrap();

        let wait = window
            .try_acquire(start + Duration::from_secs(15))
            .unwrap_err();
        assert_eq!(wait, Duration::from_secs(45));
        // Rejected calls are not recorded.
        assert_eq!(window.in_flight(start + Duration::from_secs(15)), 2);
    }

    #[test]
    fn test_slot_frees_after_period() {
        let start = Instant::now();
        let mut window = SlidingWindow::new(1, MINUTE).unwrap();

        window.try_acquire(start).unwrap();
        assert!(window.try_acquire(start + Duration::from_secs(59)).is_err());
        assert!(window.try_acquire(start + MINUTE).is_ok());
    }

    #[test]
    fn test_never_exceeds_limit_in_any_window() {
        let start = Instant::now();
        let mut window = SlidingWindow::new(5, MINUTE).unwrap();
        let mut admitted = Vec::new();

        // One attempt every 3 seconds for 5 minutes.
        for step in 0..100u64 {
            let now = start + Duration::from_secs(step * 3);
            if window.try_acquire(now).is_ok() {
                admitted.push(now);
            }
        }

        for (i, &from) in admitted.iter().enumerate() {
            let in_window = admitted[i..]
                .iter()
                .take_while(|&&t| t.duration_since(from) < MINUTE)
                .count();
            assert!(in_window <= 5, "{in_window} calls admitted within one period");
        }
        assert!(admitted.len() >= 25);
    }
}
