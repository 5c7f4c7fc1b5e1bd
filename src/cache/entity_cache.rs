//! Entity Cache Module
//!
//! Read-through cache in front of a [`Store`]: an LRU by-ID tier, an LRU +
//! TTL search tier, and write-through invalidation on every mutation.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::cache::{CacheStats, Clock, LruMap, SearchEntry, SearchKey, SystemClock};
use crate::config::CacheConfig;
use crate::domain::{DateWindow, Entity, SortOption};
use crate::error::StoreResult;
use crate::store::Store;

// == Entity Cache ==
/// Caching facade over the backing store for one entity type.
///
/// Store errors are returned exactly as the store produced them. A failed
/// call leaves both tiers untouched.
///
/// By-ID entries carry no TTL: writes that bypass this instance stay
/// invisible until the entry is evicted or invalidated.
#[derive(Debug)]
pub struct EntityCache<T: Entity, S> {
    /// Authoritative record store
    store: S,
    /// id -> snapshot
    by_id: LruMap<i64, T>,
    /// (term, limit, offset, sort) -> page
    searches: LruMap<SearchKey<T::Sort>, SearchEntry<T>>,
    /// Performance statistics
    stats: CacheStats,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl<T: Entity, S: Store<T>> EntityCache<T, S> {
    // == Constructor ==
    /// Creates a cache with default capacities, TTL and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_config(store, CacheConfig::default(), Arc::new(SystemClock))
    }

    /// Creates a cache with explicit sizing and time source.
    pub fn with_config(store: S, config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let by_id = LruMap::new(config.id_capacity);
        let searches = LruMap::new(config.search_capacity);
        let stats = CacheStats::new(T::KIND, by_id.capacity(), searches.capacity());
        Self {
            store,
            by_id,
            searches,
            stats,
            config,
            clock,
        }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // == Find By Id ==
    /// Looks a record up by id, reading through to the store on a miss.
    ///
    /// Absent records are not cached.
    pub fn find_by_id(&mut self, id: i64) -> StoreResult<Option<T>> {
        if let Some(entity) = self.by_id.get(&id) {
            self.stats.by_id.record_hit();
            debug!(entity = T::KIND, id, "By-id cache hit");
            return Ok(Some(entity.clone()));
        }

        self.stats.by_id.record_miss();
        debug!(entity = T::KIND, id, "By-id cache miss");

        let found = self.store.find_by_id(id)?;
        if let Some(entity) = &found {
            self.remember(entity.clone());
        }
        Ok(found)
    }

    // == Search ==
    /// Returns one page of records matching `term`, ordered by `sort`.
    ///
    /// Plain sorts order the fetched page in memory. Filter sorts scan the
    /// configured over-fetch window, keep the rows inside the date window,
    /// order them, then paginate.
    pub fn search(
        &mut self,
        term: Option<&str>,
        limit: usize,
        offset: usize,
        sort: Option<T::Sort>,
    ) -> StoreResult<Vec<T>> {
        let key = SearchKey::new(term, limit, offset, sort).on_day(self.filter_day(sort));
        let now = self.clock.now_ms();

        if let Some(results) = self.fresh_results(&key, now) {
            return Ok(results);
        }

        let (page, total_count) = self.fetch_page(&key)?;
        for entity in &page {
            self.remember(entity.clone());
        }

        let entry = SearchEntry::new(page.clone(), total_count, now);
        if let Some((evicted, _)) = self.searches.insert(key, entry) {
            self.stats.search.record_eviction();
            debug!(entity = T::KIND, term = %evicted.term, "Search entry evicted");
        }

        Ok(page)
    }

    // == Count ==
    /// Total number of records matching `term` (and the date window of a
    /// filter sort).
    ///
    /// Served from any fresh search entry for the same term, window and
    /// day, otherwise computed against the store.
    pub fn count(&self, term: Option<&str>, sort: Option<T::Sort>) -> StoreResult<u64> {
        let term = term.unwrap_or_default();
        let window = sort.and_then(|s| s.window());
        let day = self.filter_day(sort);
        let now = self.clock.now_ms();
        let ttl = self.config.search_ttl_ms();

        let cached = self
            .searches
            .iter()
            .find(|(key, entry)| {
                key.term == term
                    && key.sort.and_then(|s| s.window()) == window
                    && key.day == day
                    && !entry.is_expired(now, ttl)
            })
            .map(|(_, entry)| entry.total_count);

        if let Some(total) = cached {
            debug!(entity = T::KIND, term, total, "Count served from search cache");
            return Ok(total);
        }

        match (sort, window, day) {
            (Some(sort), Some(window), Some(today)) => {
                Ok(self.windowed(term, sort, window, today)?.len() as u64)
            }
            _ => self.store.count(term),
        }
    }

    // == Insert ==
    /// Creates the record, caches it under its new id and clears every
    /// memoized search.
    pub fn insert(&mut self, mut entity: T) -> StoreResult<i64> {
        let id = self.store.insert(&entity)?;
        entity.set_id(id);
        self.remember(entity);
        self.invalidate_searches("insert");
        Ok(id)
    }

    // == Update ==
    /// Writes the record through, drops its by-id entry and clears every
    /// memoized search.
    ///
    /// The entry is dropped rather than refreshed so the next read sees
    /// whatever the store actually persisted.
    pub fn update(&mut self, entity: &T) -> StoreResult<()> {
        self.store.update(entity)?;
        self.by_id.remove(&entity.id());
        self.invalidate_searches("update");
        Ok(())
    }

    // == Delete ==
    pub fn delete(&mut self, id: i64) -> StoreResult<()> {
        self.store.delete(id)?;
        self.by_id.remove(&id);
        self.invalidate_searches("delete");
        Ok(())
    }

    // == Maintenance ==
    /// Drops every cached entry in both tiers.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.searches.clear();
        debug!(entity = T::KIND, "Cache cleared");
    }

    /// Removes search entries whose TTL has run out.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl = self.config.search_ttl_ms();
        let removed = self
            .searches
            .retain(|_, entry| !entry.is_expired(now, ttl));
        self.stats.expirations += removed as u64;
        removed
    }

    // == Introspection ==
    /// Whether `id` is in the by-id tier. Does not touch recency.
    pub fn is_cached(&self, id: i64) -> bool {
        self.by_id.contains(&id)
    }

    /// Number of by-id entries.
    pub fn id_len(&self) -> usize {
        self.by_id.len()
    }

    /// Number of search entries, expired ones included until touched or
    /// purged.
    pub fn search_len(&self) -> usize {
        self.searches.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.by_id.size = self.by_id.len();
        stats.search.size = self.searches.len();
        stats
    }

    /// Human-readable current/maximum size of both tiers.
    pub fn get_cache_stats(&self) -> String {
        self.stats().to_string()
    }

    // == Internals ==
    /// Today's date for filter sorts, `None` for plain sorts.
    ///
    /// Part of the search key, so a filter page never outlives its day.
    fn filter_day(&self, sort: Option<T::Sort>) -> Option<NaiveDate> {
        sort.and_then(|s| s.window()).map(|_| self.clock.today())
    }

    fn remember(&mut self, entity: T) {
        if let Some((evicted, _)) = self.by_id.insert(entity.id(), entity) {
            self.stats.by_id.record_eviction();
            debug!(entity = T::KIND, id = evicted, "By-id entry evicted");
        }
    }

    /// Copy of the cached page for `key` if present and within TTL.
    ///
    /// An expired entry is removed on the way out.
    fn fresh_results(&mut self, key: &SearchKey<T::Sort>, now: u64) -> Option<Vec<T>> {
        let ttl = self.config.search_ttl_ms();
        let expired = match self.searches.get(key) {
            Some(entry) if !entry.is_expired(now, ttl) => {
                self.stats.search.record_hit();
                debug!(
                    entity = T::KIND,
                    term = %key.term,
                    ttl_remaining_ms = entry.ttl_remaining_ms(now, ttl),
                    "Search cache hit"
                );
                return Some(entry.results.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.searches.remove(key);
            self.stats.record_expiration();
            debug!(entity = T::KIND, term = %key.term, "Search entry expired");
        }
        self.stats.search.record_miss();
        None
    }

    fn fetch_page(&self, key: &SearchKey<T::Sort>) -> StoreResult<(Vec<T>, u64)> {
        let term = key.term.as_str();

        let filter = key.sort.and_then(|s| s.window().map(|w| (s, w)));
        match filter.zip(key.day) {
            Some(((sort, window), today)) => {
                let matching = self.windowed(term, sort, window, today)?;
                let total = matching.len() as u64;
                let page = matching
                    .into_iter()
                    .skip(key.offset)
                    .take(key.limit)
                    .collect();
                Ok((page, total))
            }
            None => {
                let mut page = self.store.search(term, key.limit, key.offset)?;
                let total = self.store.count(term)?;
                if let Some(sort) = key.sort {
                    page.sort_by(|a, b| sort.compare(a, b));
                }
                Ok((page, total))
            }
        }
    }

    /// Every row in the over-fetch window whose date falls in `window`,
    /// ordered by `sort`.
    fn windowed(
        &self,
        term: &str,
        sort: T::Sort,
        window: DateWindow,
        today: NaiveDate,
    ) -> StoreResult<Vec<T>> {
        let limit = self.config.filter_window;

        let mut rows = self.store.search(term, limit, 0)?;
        if rows.len() >= limit {
            warn!(
                entity = T::KIND,
                limit, "Filter window saturated, results may be incomplete"
            );
        }

        rows.retain(|row| {
            row.window_date()
                .is_some_and(|date| window.contains(date, today))
        });
        rows.sort_by(|a, b| sort.compare(a, b));
        Ok(rows)
    }

    fn invalidate_searches(&mut self, op: &'static str) {
        let dropped = self.searches.len();
        self.searches.clear();
        self.stats.record_invalidation();
        debug!(entity = T::KIND, op, dropped, "Search cache invalidated");
    }
}
