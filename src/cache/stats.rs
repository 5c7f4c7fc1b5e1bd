//! Cache Statistics Module
//!
//! Tracks hits, misses, evictions and invalidations for both cache tiers.

use std::fmt;

use serde::Serialize;

// == Tier Stats ==
/// Counters and occupancy for one cache tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that went to the store
    pub misses: u64,
    /// Entries dropped by LRU pressure
    pub evictions: u64,
    /// Current number of entries
    pub size: usize,
    /// Maximum number of entries
    pub capacity: usize,
}

impl TierStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Stats ==
/// Snapshot of an entity cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entity kind the cache serves
    pub entity: &'static str,
    /// By-ID tier
    pub by_id: TierStats,
    /// Search-result tier
    pub search: TierStats,
    /// Search entries dropped because their TTL ran out
    pub expirations: u64,
    /// Mutations that cleared the search tier
    pub invalidations: u64,
}

impl CacheStats {
    // == Constructor ==
    pub fn new(entity: &'static str, id_capacity: usize, search_capacity: usize) -> Self {
        Self {
            entity,
            by_id: TierStats::new(id_capacity),
            search: TierStats::new(search_capacity),
            expirations: 0,
            invalidations: 0,
        }
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cache - by id: {}/{}, search: {}/{}",
            self.entity,
            self.by_id.size,
            self.by_id.capacity,
            self.search.size,
            self.search.capacity
        )
    }
}
