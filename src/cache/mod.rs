//! Cache Module
//!
//! Generic read-through entity cache: LRU by-ID lookups, LRU + TTL search
//! memoization, and write-through invalidation.

mod clock;
mod entity_cache;
mod entry;
mod lru;
mod stats;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity_cache::EntityCache;
pub use entry::{current_timestamp_ms, SearchEntry, SearchKey};
pub use lru::LruMap;
pub use stats::{CacheStats, TierStats};

// == Public Constants ==
/// Default by-ID cache capacity
pub const DEFAULT_ID_CAPACITY: usize = 100;

/// Default search cache capacity
pub const DEFAULT_SEARCH_CAPACITY: usize = 20;

/// Default search entry TTL in seconds
pub const DEFAULT_SEARCH_TTL_SECS: u64 = 60;

/// Default number of rows over-fetched for date-window filter sorts
pub const DEFAULT_FILTER_WINDOW: usize = 2000;
