//! Clock Module
//!
//! Time source for TTL checks and date-window filters.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use super::entry::current_timestamp_ms;

/// Millisecond wall clock consulted by the cache.
pub trait Clock: Debug + Send + Sync {
    /// Current Unix time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms() as i64)
            .unwrap_or_default()
            .date_naive()
    }
}

// == System Clock ==
/// Real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        current_timestamp_ms()
    }
}

// == Manual Clock ==
/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Starts at midnight UTC of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        let start = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis().max(0) as u64)
            .unwrap_or_default();
        Self::new(start)
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(1_000);
        clock.advance(Duration::from_secs(61));
        assert_eq!(clock.now_ms(), 62_000);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(0);
        let handle = clock.clone();
        handle.set(5_000);
        assert_eq!(clock.now_ms(), 5_000);
    }

    #[test]
    fn test_manual_clock_today() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let clock = ManualClock::at_date(date);
        assert_eq!(clock.today(), date);

        clock.advance(Duration::from_secs(23 * 3600));
        assert_eq!(clock.today(), date);

        clock.advance(Duration::from_secs(3600));
        assert_eq!(clock.today(), date.succ_opt().unwrap());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        assert!(clock.now_ms() > 0);
        assert!(clock.today() > NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }
}
