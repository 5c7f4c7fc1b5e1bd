//! Cache Entry Module
//!
//! Search-cache key and TTL-stamped search entry.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;

// == Search Key ==
/// Composite identity of a memoized search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey<S> {
    /// Search term, empty when absent
    pub term: String,
    pub limit: usize,
    pub offset: usize,
    /// Requested ordering, `None` keeps store order
    pub sort: Option<S>,
    /// Date a date-window filter was evaluated against, `None` for plain
    /// sorts
    pub day: Option<NaiveDate>,
}

impl<S> SearchKey<S> {
    /// Builds a key, normalizing an absent term to the empty string.
    pub fn new(term: Option<&str>, limit: usize, offset: usize, sort: Option<S>) -> Self {
        Self {
            term: term.unwrap_or_default().to_string(),
            limit,
            offset,
            sort,
            day: None,
        }
    }

    /// Pins the key to the date a filter sort is evaluated on.
    pub fn on_day(mut self, day: Option<NaiveDate>) -> Self {
        self.day = day;
        self
    }
}

// == Search Entry ==
/// One memoized result page with the total it was counted against.
#[derive(Debug, Clone)]
pub struct SearchEntry<T> {
    /// The page, already in requested order
    pub results: Vec<T>,
    /// Total matches for the term at fetch time
    pub total_count: u64,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl<T> SearchEntry<T> {
    // == Constructor ==
    pub fn new(results: Vec<T>, total_count: u64, created_at: u64) -> Self {
        Self {
            results,
            total_count,
            created_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl_ms` at time `now_ms`.
    ///
    /// Boundary condition: an entry created at `t` is expired for every
    /// `now_ms >= t + ttl_ms`.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms >= self.created_at.saturating_add(ttl_ms)
    }

    /// Remaining lifetime in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64, ttl_ms: u64) -> u64 {
        self.created_at.saturating_add(ttl_ms).saturating_sub(now_ms)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
